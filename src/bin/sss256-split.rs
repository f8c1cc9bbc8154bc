//! `sss256-split`: reads a secret from stdin, splits it into N Shamir shares
//! over GF(2^8), and writes the shares to stdout. Progress and a coefficient
//! digest go to stderr.

use sss256::arena::{Arena, Buffer};
use sss256::cli::{self, Outcome, SplitArgs};
use sss256::entropy::{EntropySource, OsEntropy};
use sss256::error::AppError;
use sss256::writer::ErrorRetainingWriter;
use sss256::{digest, share};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use zeroize::Zeroize;

/// Read the secret to EOF, then copy it into an arena-owned, zeroize-on-drop
/// buffer; the intermediate `Vec` (whose final length isn't known up front)
/// is scrubbed in place once its contents have been copied out.
fn read_secret<R: Read>(reader: &mut R, arena: &mut Arena) -> Result<Buffer, AppError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw).map_err(AppError::Stdin)?;
    if raw.is_empty() {
        return Err(AppError::EmptySecret);
    }
    let mut secret = arena.alloc_zeroed(raw.len());
    secret.as_mut_slice().copy_from_slice(&raw);
    raw.zeroize();
    Ok(secret)
}

fn run<R: Read, W: Write, O: Write, E: EntropySource>(
    args: &SplitArgs,
    reader: &mut R,
    out: &mut O,
    stderr: &mut ErrorRetainingWriter<W>,
    entropy: &mut E,
) -> Result<(), AppError> {
    let mut arena = Arena::new();

    let secret = read_secret(reader, &mut arena)?;

    let t = args.threshold as usize;
    let n = args.shares;

    let coeff_len = secret
        .len()
        .checked_mul(t - 1)
        .ok_or_else(|| AppError::OutOfMemory("coefficient buffer size overflow".to_string()))?;
    let mut coeffs = arena.alloc_zeroed(coeff_len);

    entropy.fill(coeffs.as_mut_slice())?;

    stderr.write_all(
        format!(
            "Splitting a {}-byte secret into {} shares (threshold {}).\n",
            secret.len(),
            n,
            args.threshold
        )
        .as_bytes(),
    );
    digest::digest(stderr, coeffs.as_slice());

    share::encode(secret.as_slice(), coeffs.as_slice(), n, out)?;
    out.flush().map_err(AppError::Stdout)?;

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let split_args = match cli::parse_split(args) {
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

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    let mut stderr = ErrorRetainingWriter::new(io::stderr());
    let mut entropy = OsEntropy;

    let result = run(
        &split_args,
        &mut reader,
        &mut writer,
        &mut stderr,
        &mut entropy,
    );

    if let Err(e) = result {
        // parser/digest diagnostics already went through `stderr`; this
        // covers the remaining error kinds that haven't been reported yet.
        stderr.write_all(format!("{e}\n").as_bytes());
        let _ = stderr.into_result();
        return ExitCode::from(e.exit_code() as u8);
    }

    match stderr.into_result() {
        Ok(()) => ExitCode::from(0),
        Err(_) => ExitCode::from(11),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sss256::cli::SplitArgs;
    use sss256::entropy::fakes::FixedEntropy;
    use std::io::Cursor;

    /// Feeding `run` a fixed secret and a `FixedEntropy` fake makes the
    /// whole split pipeline deterministic, so the output can be asserted
    /// byte-for-byte without ever touching the OS CSPRNG.
    #[test]
    fn split_round_trip_is_deterministic_with_fixed_entropy() {
        let args = SplitArgs {
            threshold: 3,
            shares: 5,
        };
        let mut reader = Cursor::new(b"hi".to_vec());
        let mut out = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stderr = ErrorRetainingWriter::new(&mut stderr_buf);
        // 2 bytes secret * (t-1=2) coefficients = 4 coefficient bytes needed.
        let mut entropy = FixedEntropy::new(vec![0x11, 0x22, 0x33, 0x44]);

        run(&args, &mut reader, &mut out, &mut stderr, &mut entropy).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        for (k, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("{:02x}-", k + 1)));
        }

        let diagnostics = String::from_utf8(stderr_buf).unwrap();
        assert!(diagnostics.contains("Splitting a 2-byte secret into 5 shares (threshold 3)."));
        assert!(diagnostics.contains("Random coefficients are 0x11223344"));

        // running again with the same fixture must reproduce the exact
        // same share lines, since nothing in the pipeline is nondeterministic.
        let mut reader2 = Cursor::new(b"hi".to_vec());
        let mut out2 = Vec::new();
        let mut stderr_buf2 = Vec::new();
        let mut stderr2 = ErrorRetainingWriter::new(&mut stderr_buf2);
        let mut entropy2 = FixedEntropy::new(vec![0x11, 0x22, 0x33, 0x44]);
        run(&args, &mut reader2, &mut out2, &mut stderr2, &mut entropy2).unwrap();
        assert_eq!(text, String::from_utf8(out2).unwrap());
    }

    #[test]
    fn empty_secret_is_rejected_before_touching_entropy() {
        let args = SplitArgs {
            threshold: 2,
            shares: 3,
        };
        let mut reader = Cursor::new(Vec::<u8>::new());
        let mut out = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stderr = ErrorRetainingWriter::new(&mut stderr_buf);
        let mut entropy = FixedEntropy::new(vec![]);

        let err = run(&args, &mut reader, &mut out, &mut stderr, &mut entropy).unwrap_err();
        assert!(matches!(err, AppError::EmptySecret));
    }
}
