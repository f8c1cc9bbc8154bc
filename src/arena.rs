//! A single allocation region for one process invocation.
//!
//! Both `split` and `combine` need a handful of byte buffers (the secret,
//! the coefficients, the parsed coordinate array) whose lifetime is exactly
//! the invocation. Rather than scatter individual `Vec<u8>`s with individual
//! drop points, everything is carved out of one arena that is zeroized and
//! released as a single step when the driver returns.

use zeroize::Zeroize;

/// An allocation handed out by an [`Arena`]. Holds its own backing storage
/// and zeroizes it on drop.
#[derive(Default)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Bump-style allocator: every call to [`Arena::alloc`] or
/// [`Arena::alloc_zeroed`] hands out an independently zeroize-on-drop
/// [`Buffer`]. There is no reuse or compaction; the arena's job is purely to
/// give the drivers one place that owns every sensitive buffer for the
/// invocation, rather than each component managing its own `Vec`.
#[derive(Default)]
pub struct Arena {
    live_bytes: usize,
}

impl Arena {
    pub fn new() -> Self {
        Arena { live_bytes: 0 }
    }

    /// Allocate `len` zeroed bytes, checking for overflow in the byte count
    /// computation the caller used to arrive at `len` is the caller's job;
    /// this just guards the allocation itself.
    pub fn alloc_zeroed(&mut self, len: usize) -> Buffer {
        self.live_bytes = self.live_bytes.saturating_add(len);
        Buffer {
            bytes: vec![0u8; len],
        }
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_zeroed_is_zero_filled() {
        let mut arena = Arena::new();
        let buf = arena.alloc_zeroed(16);
        assert_eq!(buf.as_slice(), &[0u8; 16]);
    }

    #[test]
    fn tracks_live_bytes() {
        let mut arena = Arena::new();
        let _a = arena.alloc_zeroed(10);
        let _b = arena.alloc_zeroed(5);
        assert_eq!(arena.live_bytes(), 15);
    }
}
