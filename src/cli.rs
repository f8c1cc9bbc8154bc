//! The argument-parser collaborator: a thin wrapper around `clap` that maps
//! its own error kinds onto the bit-exact exit-code contract instead of
//! letting `clap` print its own message and call `std::process::exit`.

use crate::error::AppError;
use clap::error::ErrorKind;
use clap::Parser;

/// What came out of parsing: either a validated set of arguments, or a
/// request to print help text and exit cleanly.
pub enum Outcome<T> {
    Parsed(T),
    Help(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "sss256-split",
    about = "Split a secret read from stdin into N Shamir shares",
    disable_help_flag = false
)]
pub struct SplitArgs {
    /// Minimum number of shares required to reconstruct the secret (2..=255).
    #[arg(short = 't', long = "threshold")]
    pub threshold: u16,

    /// Total number of shares to produce (threshold..=255).
    #[arg(short = 'n', long = "shares")]
    pub shares: u16,
}

#[derive(Parser, Debug)]
#[command(
    name = "sss256-combine",
    about = "Reconstruct a secret from T Shamir shares read from stdin",
    disable_help_flag = false
)]
pub struct CombineArgs {
    /// Number of shares to read from stdin (2..=255).
    #[arg(short = 't', long = "threshold")]
    pub threshold: u16,
}

/// Translate a `clap` parse failure into either help text to print (clean
/// exit 0) or the `AppError` whose exit code matches the §6 contract.
fn map_clap_error(e: clap::Error) -> Result<String, AppError> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(e.to_string())
        }
        ErrorKind::UnknownArgument => Err(AppError::UnknownArgument(e.to_string())),
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
            Err(AppError::InvalidArgumentValue {
                flag: String::new(),
                detail: e.to_string(),
            })
        }
        _ => Err(AppError::ArgumentParserError(e.to_string())),
    }
}

fn validate_threshold(t: u16) -> Result<(), AppError> {
    if !(2..=255).contains(&t) {
        return Err(AppError::InvalidArgumentValue {
            flag: "-t/--threshold".to_string(),
            detail: format!("must be between 2 and 255, got {t}"),
        });
    }
    Ok(())
}

pub fn parse_split<I, S>(args: I) -> Result<Outcome<SplitArgs>, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    match SplitArgs::try_parse_from(args) {
        Ok(a) => {
            validate_threshold(a.threshold)?;
            if !(2..=255).contains(&a.shares) {
                return Err(AppError::InvalidArgumentValue {
                    flag: "-n/--shares".to_string(),
                    detail: format!("must be between 2 and 255, got {}", a.shares),
                });
            }
            if a.threshold > a.shares {
                return Err(AppError::ThresholdExceedsShares {
                    t: a.threshold,
                    n: a.shares,
                });
            }
            Ok(Outcome::Parsed(a))
        }
        Err(e) => Ok(Outcome::Help(map_clap_error(e)?)),
    }
}

pub fn parse_combine<I, S>(args: I) -> Result<Outcome<CombineArgs>, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    match CombineArgs::try_parse_from(args) {
        Ok(a) => {
            validate_threshold(a.threshold)?;
            Ok(Outcome::Parsed(a))
        }
        Err(e) => Ok(Outcome::Help(map_clap_error(e)?)),
    }
}
