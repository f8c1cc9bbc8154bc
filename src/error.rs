//! The application-level error taxonomy and its bit-exact mapping to process
//! exit codes (see §6/§7 of the design).

use thiserror::Error;

/// Every error the two drivers can report, each carrying its contractual
/// exit code via [`AppError::exit_code`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("invalid value for {flag}: {detail}")]
    InvalidArgumentValue { flag: String, detail: String },

    #[error("--threshold ({t}) must not exceed --shares ({n})")]
    ThresholdExceedsShares { t: u16, n: u16 },

    #[error("argument parsing failed: {0}")]
    ArgumentParserError(String),

    #[error("the secret read from stdin must not be empty")]
    EmptySecret,

    #[error("{0}")]
    ShareTooLong(String),

    #[error("{0}")]
    Parse(String),

    #[error("out of memory: {0}")]
    OutOfMemory(String),

    #[error("failed to read the secret from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to write shares to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("failed to write diagnostics to stderr: {0}")]
    Stderr(#[source] std::io::Error),

    #[error("no entropy available: {0}")]
    NoEntropy(String),
}

impl AppError {
    /// The bit-exact exit code for this error, per the shared enumeration in
    /// the interface contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::UnknownArgument(_) => 1,
            AppError::InvalidArgumentValue { .. } => 2,
            AppError::ThresholdExceedsShares { .. } => 3,
            AppError::EmptySecret => 4,
            AppError::ShareTooLong(_) => 5,
            AppError::Parse(_) => 6,
            AppError::ArgumentParserError(_) => 7,
            AppError::OutOfMemory(_) => 8,
            AppError::Stdin(_) => 9,
            AppError::Stdout(_) => 10,
            AppError::Stderr(_) => 11,
            AppError::NoEntropy(_) => 12,
        }
    }
}

/// Exit code used when everything succeeds.
pub const EXIT_OK: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_bit_exact() {
        assert_eq!(AppError::UnknownArgument("x".into()).exit_code(), 1);
        assert_eq!(
            AppError::InvalidArgumentValue {
                flag: "-t".into(),
                detail: "not a number".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            AppError::ThresholdExceedsShares { t: 5, n: 3 }.exit_code(),
            3
        );
        assert_eq!(AppError::EmptySecret.exit_code(), 4);
        assert_eq!(AppError::ShareTooLong("x".into()).exit_code(), 5);
        assert_eq!(AppError::Parse("x".into()).exit_code(), 6);
        assert_eq!(AppError::ArgumentParserError("x".into()).exit_code(), 7);
        assert_eq!(AppError::OutOfMemory("x".into()).exit_code(), 8);
        assert_eq!(
            AppError::Stdin(std::io::Error::new(std::io::ErrorKind::Other, "x")).exit_code(),
            9
        );
        assert_eq!(
            AppError::Stdout(std::io::Error::new(std::io::ErrorKind::Other, "x")).exit_code(),
            10
        );
        assert_eq!(
            AppError::Stderr(std::io::Error::new(std::io::ErrorKind::Other, "x")).exit_code(),
            11
        );
        assert_eq!(AppError::NoEntropy("x".into()).exit_code(), 12);
    }
}
