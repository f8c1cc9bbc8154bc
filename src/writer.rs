//! An infallible-from-the-caller's-perspective `Write` adapter for stderr.
//!
//! Diagnostic and progress messages are emitted from many places — the
//! parser, the digest formatter, the drivers themselves — and none of them
//! should have to thread an I/O `Result` through just to report a message
//! that is, in the overwhelming case, going to a terminal. The first
//! underlying failure is latched instead, and surfaced once at teardown.

use std::io::{self, Write};

pub struct ErrorRetainingWriter<W> {
    inner: W,
    latched: Option<io::Error>,
}

impl<W: Write> ErrorRetainingWriter<W> {
    pub fn new(inner: W) -> Self {
        ErrorRetainingWriter {
            inner,
            latched: None,
        }
    }

    /// Write `buf`, swallowing any error into the latch. Always succeeds
    /// from the caller's point of view.
    pub fn write_all(&mut self, buf: &[u8]) {
        if self.latched.is_some() {
            return;
        }
        if let Err(e) = self.inner.write_all(buf) {
            self.latched = Some(e);
        }
    }

    pub fn flush(&mut self) {
        if self.latched.is_some() {
            return;
        }
        if let Err(e) = self.inner.flush() {
            self.latched = Some(e);
        }
    }

    /// Take the latched error, if any occurred since construction.
    pub fn into_result(mut self) -> Result<(), io::Error> {
        match self.latched.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;
    impl Write for AlwaysFails {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn swallows_write_errors_and_latches_first() {
        let mut w = ErrorRetainingWriter::new(AlwaysFails);
        w.write_all(b"one");
        w.write_all(b"two");
        w.flush();
        assert!(w.into_result().is_err());
    }

    #[test]
    fn succeeds_silently_on_a_working_sink() {
        let mut buf = Vec::new();
        {
            let mut w = ErrorRetainingWriter::new(&mut buf);
            w.write_all(b"hello ");
            w.write_all(b"world");
            assert!(w.into_result().is_ok());
        }
        assert_eq!(buf, b"hello world");
    }
}
