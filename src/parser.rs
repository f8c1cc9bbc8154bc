//! The strict line-oriented share parser.
//!
//! Reads exactly `t` lines of `ii-hh...hh\n` text off a byte stream into a
//! single flat [`CoordArray`]-shaped buffer (see the module-level layout
//! note on [`parse`]), validating structure token by token and reporting
//! column-accurate diagnostics through an [`ErrorRetainingWriter`].

use crate::arena::{Arena, Buffer};
use crate::error::AppError;
use crate::writer::ErrorRetainingWriter;
use std::io::Read;

/// Standard C0 control-code mnemonics, plus DEL.
fn control_mnemonic(b: u8) -> &'static str {
    const C0: [&str; 32] = [
        "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "HT", "LF", "VT", "FF",
        "CR", "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB", "CAN", "EM",
        "SUB", "ESC", "FS", "GS", "RS", "US",
    ];
    if b == 0x7f {
        "DEL"
    } else {
        C0[b as usize]
    }
}

fn is_control(b: u8) -> bool {
    b < 0x20 || b == 0x7f
}

fn found_phrase(byte: Option<u8>) -> String {
    match byte {
        None => "reached the end of input".to_string(),
        Some(b) if is_control(b) => {
            format!("found control code {} (hex {:#04x})", control_mnemonic(b), b)
        }
        Some(b) if b < 0x80 => format!("found '{}'", b as char),
        Some(b) => format!("found non-ASCII byte {:#04x}", b),
    }
}

fn expected_error(expected: &str, found: Option<u8>, line: usize, column: usize) -> String {
    format!(
        "Expected {}, but {} on line {}, column {}.\n",
        expected,
        found_phrase(found),
        line,
        column
    )
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn read_one_byte<R: Read>(reader: &mut R) -> Result<Option<u8>, std::io::Error> {
    let mut b = [0u8; 1];
    loop {
        match reader.read(&mut b) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(b[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

struct Cursor<'a, R: Read> {
    reader: &'a mut R,
}

impl<'a, R: Read> Cursor<'a, R> {
    fn next(&mut self) -> Result<Option<u8>, AppError> {
        read_one_byte(self.reader).map_err(AppError::Stdin)
    }

    /// Read one ASCII hex digit at `column`, emitting and returning a
    /// `Parse` error (after logging it) on anything else.
    fn expect_hex_digit<W: std::io::Write>(
        &mut self,
        log: &mut ErrorRetainingWriter<W>,
        line: usize,
        column: usize,
    ) -> Result<u8, AppError> {
        let byte = self.next()?;
        match byte.and_then(hex_nibble) {
            Some(v) => Ok(v),
            None => {
                let msg = expected_error("hex digit", byte, line, column);
                log.write_all(msg.as_bytes());
                Err(AppError::Parse(msg))
            }
        }
    }

    /// Read a two-nibble hex byte starting at `column`.
    fn expect_hex_byte<W: std::io::Write>(
        &mut self,
        log: &mut ErrorRetainingWriter<W>,
        line: usize,
        column: usize,
    ) -> Result<u8, AppError> {
        let hi = self.expect_hex_digit(log, line, column)?;
        let lo = self.expect_hex_digit(log, line, column + 1)?;
        Ok((hi << 4) | lo)
    }

    fn expect_literal<W: std::io::Write>(
        &mut self,
        log: &mut ErrorRetainingWriter<W>,
        line: usize,
        column: usize,
        expected_byte: u8,
        expected_desc: &str,
    ) -> Result<(), AppError> {
        let byte = self.next()?;
        if byte == Some(expected_byte) {
            Ok(())
        } else {
            let msg = expected_error(expected_desc, byte, line, column);
            log.write_all(msg.as_bytes());
            Err(AppError::Parse(msg))
        }
    }
}

fn validate_index<W: std::io::Write>(
    idx: u8,
    line: usize,
    seen: &mut Vec<(u8, usize)>,
    log: &mut ErrorRetainingWriter<W>,
) -> Result<(), AppError> {
    if idx == 0 {
        let msg = format!("Share on line {} has the invalid index 0x00.\n", line);
        log.write_all(msg.as_bytes());
        return Err(AppError::Parse(msg));
    }
    if let Some(&(_, earlier_line)) = seen.iter().find(|(i, _)| *i == idx) {
        let msg = format!(
            "Shares on lines {} and {} have the same index 0x{:02x}.\n",
            earlier_line, line, idx
        );
        log.write_all(msg.as_bytes());
        return Err(AppError::Parse(msg));
    }
    seen.push((idx, line));
    Ok(())
}

/// Parse exactly `t` lines of share text from `reader` into a flat
/// `CoordArray` of length `t * (1 + L)`: the first `t` bytes are share
/// indices in line order, followed by column-major data — for data column
/// `p` the `t` y-values live at `t*(1+p) .. t*(1+p)+t`. The array is carved
/// out of `arena`, so it is zeroized on drop like every other sensitive
/// buffer `combine` handles.
pub fn parse<R: Read, W: std::io::Write>(
    reader: &mut R,
    log: &mut ErrorRetainingWriter<W>,
    t: usize,
    arena: &mut Arena,
) -> Result<Buffer, AppError> {
    debug_assert!((2..=255).contains(&t));

    let mut cursor = Cursor { reader };
    let mut seen_indices: Vec<(u8, usize)> = Vec::with_capacity(t);

    // Guarantees t * (1 + l) fits in usize for any l <= max_l, on both
    // 32- and 64-bit targets.
    let max_l = (usize::MAX / t).saturating_sub(1);

    // --- line 1: discover L ---
    let idx1 = cursor.expect_hex_byte(log, 1, 1)?;
    validate_index(idx1, 1, &mut seen_indices, log)?;
    cursor.expect_literal(log, 1, 3, b'-', "'-'")?;

    // L is at least 1 (the Secret is non-empty), so the first data byte is
    // mandatory — a '\n' here is a parse error, not a valid (empty) L.
    let first_data_column = 2 * 2;
    let hi0 = cursor.expect_hex_digit(log, 1, first_data_column)?;
    let lo0 = cursor.expect_hex_digit(log, 1, first_data_column + 1)?;
    let mut first_line_data: Vec<u8> = vec![(hi0 << 4) | lo0];

    loop {
        // token index of the token about to be read: either the next data
        // byte, or (if '\n' is found here) the terminator.
        let next_token = first_line_data.len() + 2;
        let column = 2 * next_token;
        let peek = cursor.next()?;
        if peek == Some(b'\n') {
            break;
        }
        // not the terminator: treat as the first nibble of a data byte.
        let hi = match peek.and_then(hex_nibble) {
            Some(v) => v,
            None => {
                let msg = expected_error("hex digit", peek, 1, column);
                log.write_all(msg.as_bytes());
                return Err(AppError::Parse(msg));
            }
        };
        let lo = cursor.expect_hex_digit(log, 1, column + 1)?;
        first_line_data.push((hi << 4) | lo);

        if first_line_data.len() > max_l {
            let msg = format!(
                "Share on line 1 is too long: more than {} data bytes.\n",
                max_l
            );
            log.write_all(msg.as_bytes());
            return Err(AppError::ShareTooLong(msg));
        }
    }
    let l = first_line_data.len();

    let mut coord = arena.alloc_zeroed(t * (1 + l));
    {
        let buf = coord.as_mut_slice();
        buf[0] = idx1;
        for (p, &b) in first_line_data.iter().enumerate() {
            buf[t * (p + 1)] = b;
        }
    }

    // --- lines 2..=t: L is now fixed ---
    for line in 2..=t {
        let idx = cursor.expect_hex_byte(log, line, 1)?;
        validate_index(idx, line, &mut seen_indices, log)?;
        cursor.expect_literal(log, line, 3, b'-', "'-'")?;

        for p in 0..l {
            let column = 2 * (p + 2);
            let b = cursor.expect_hex_byte(log, line, column)?;
            coord.as_mut_slice()[t * (p + 1) + (line - 1)] = b;
        }

        let term_column = 2 * (l + 2);
        cursor.expect_literal(log, line, term_column, b'\n', "newline")?;
    }

    Ok(coord)
}
