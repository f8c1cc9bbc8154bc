//! `sss256-combine`: reads exactly T Shamir shares from stdin and writes the
//! reconstructed secret to stdout.

use sss256::arena::Arena;
use sss256::cli::{self, CombineArgs, Outcome};
use sss256::error::AppError;
use sss256::writer::ErrorRetainingWriter;
use sss256::{parser, reconstruct};
use std::io::{self, Write};
use std::process::ExitCode;

fn run<W: Write>(
    args: &CombineArgs,
    stderr: &mut ErrorRetainingWriter<W>,
) -> Result<(), AppError> {
    let t = args.threshold as usize;
    let mut arena = Arena::new();

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let coord = parser::parse(&mut reader, stderr, t, &mut arena)?;

    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    reconstruct::reconstruct(coord.as_slice(), t, &mut writer)?;
    writer.flush().map_err(AppError::Stdout)?;

    Ok(())
}

/// True for error kinds the parser itself already wrote to `stderr` as part
/// of producing a column-accurate diagnostic; printing them again at the
/// top level would duplicate the message.
fn already_reported(e: &AppError) -> bool {
    matches!(e, AppError::Parse(_) | AppError::ShareTooLong(_))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let combine_args = match cli::parse_combine(args) {
        Ok(Outcome::Parsed(a)) => a,
        Ok(Outcome::Help(text)) => {
            print!("{text}");
            return ExitCode::from(0);
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let mut stderr = ErrorRetainingWriter::new(io::stderr());
    let result = run(&combine_args, &mut stderr);

    if let Err(e) = result {
        if !already_reported(&e) {
            stderr.write_all(format!("{e}\n").as_bytes());
        }
        let _ = stderr.into_result();
        return ExitCode::from(e.exit_code() as u8);
    }

    match stderr.into_result() {
        Ok(()) => ExitCode::from(0),
        Err(_) => ExitCode::from(11),
    }
}
