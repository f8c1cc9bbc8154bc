//! The entropy collaborator: "produce N uniformly random bytes, or fail".
//!
//! Production code talks to the OS CSPRNG through [`OsEntropy`]; tests and
//! the deterministic end-to-end fixtures substitute a fake that implements
//! the same [`EntropySource`] trait, so the cryptographic core never has to
//! touch the real RNG to be exercised.

use crate::error::AppError;

/// Bytes are requested from the OS in chunks no larger than this, so a
/// partial fill or an interrupted syscall can be classified per-chunk
/// rather than leaving a half-filled buffer of unknown provenance.
const CHUNK_SIZE: usize = 256;

pub trait EntropySource {
    /// Fill `buf` with uniformly random bytes, or fail. A short fill without
    /// an error is not a valid outcome; implementations must treat that
    /// case as failure too.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), AppError>;
}

/// The production entropy source, backed by the operating system's CSPRNG
/// via the `getrandom` crate.
#[derive(Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), AppError> {
        for chunk in buf.chunks_mut(CHUNK_SIZE) {
            // `getrandom::getrandom` already retries internally on EINTR at
            // the syscall boundary and is all-or-nothing per call: it either
            // fills `chunk` completely or returns an error. Both an
            // interrupted pool-not-ready condition and any other OS failure
            // therefore surface here as the same outcome — entropy is not
            // currently available — which is exactly the exit-code contract
            // (12, "no entropy") for both cases.
            getrandom::getrandom(chunk)
                .map_err(|e| AppError::NoEntropy(format!("getrandom failed: {e}")))?;
        }
        Ok(())
    }
}

/// Deterministic `EntropySource` fakes. Not `#[cfg(test)]`-gated: the
/// drivers' own integration tests (in `src/bin/`) live in a separate crate
/// from this library and need to reach these after the library itself has
/// been built normally, not just during `sss256`'s own unit-test pass.
pub mod fakes {
    use super::*;

    /// A deterministic, non-cryptographic fake used by integration tests
    /// that need reproducible "random" coefficients.
    pub struct FixedEntropy {
        pub bytes: Vec<u8>,
        pub offset: usize,
    }

    impl FixedEntropy {
        pub fn new(bytes: Vec<u8>) -> Self {
            FixedEntropy { bytes, offset: 0 }
        }
    }

    impl EntropySource for FixedEntropy {
        fn fill(&mut self, buf: &mut [u8]) -> Result<(), AppError> {
            if self.offset + buf.len() > self.bytes.len() {
                return Err(AppError::NoEntropy("fixture exhausted".into()));
            }
            buf.copy_from_slice(&self.bytes[self.offset..self.offset + buf.len()]);
            self.offset += buf.len();
            Ok(())
        }
    }

    /// A fake that always fails, for exercising the abort path.
    pub struct FailingEntropy;

    impl EntropySource for FailingEntropy {
        fn fill(&mut self, _buf: &mut [u8]) -> Result<(), AppError> {
            Err(AppError::NoEntropy("simulated EINTR".into()))
        }
    }
}
