//! A short, human-readable digest of a random coefficient buffer, written to
//! stderr alongside `split`'s progress messages so an operator can sanity
//! check that entropy was actually consumed without printing every byte.

use crate::writer::ErrorRetainingWriter;
use std::io::Write;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex_byte(out: &mut String, b: u8) {
    out.push(HEX_DIGITS[(b >> 4) as usize] as char);
    out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
}

/// Render coeffs' digest: up to 6 leading/trailing bytes in hex (with a
/// `..` gap if there's more in between) followed by the mean popcount per
/// byte as a two-decimal fraction. Writes are best-effort through `log`.
pub fn digest<W: Write>(log: &mut ErrorRetainingWriter<W>, coeffs: &[u8]) {
    let mut s = String::from("Random coefficients are 0x");

    let m = coeffs.len().min(6);
    for k in 0..m {
        if coeffs.len() > m && k == m / 2 {
            s.push_str("..");
        }
        let off = if k < m / 2 { 0 } else { coeffs.len() - m };
        push_hex_byte(&mut s, coeffs[off + k]);
    }

    let pop: u64 = coeffs.iter().map(|b| b.count_ones() as u64).sum();
    let n = coeffs.len() as u64;
    let percent = if n == 0 {
        0
    } else {
        (100 * pop + 4 * n) / (8 * n)
    };
    s.push_str(&format!(
        " with a bit average of {}.{:02}.\n",
        percent / 100,
        percent % 100
    ));

    log.write_all(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(coeffs: &[u8]) -> String {
        let mut buf = Vec::new();
        let mut log = ErrorRetainingWriter::new(&mut buf);
        digest(&mut log, coeffs);
        log.into_result().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn all_zero_byte() {
        assert_eq!(
            rendered(&[0x00]),
            "Random coefficients are 0x00 with a bit average of 0.00.\n"
        );
    }

    #[test]
    fn single_nibble_set() {
        assert_eq!(
            rendered(&[0x10]),
            "Random coefficients are 0x10 with a bit average of 0.13.\n"
        );
    }

    #[test]
    fn all_ones_byte() {
        assert_eq!(
            rendered(&[0xff]),
            "Random coefficients are 0xff with a bit average of 1.00.\n"
        );
    }

    #[test]
    fn seven_bytes_uses_ellipsis() {
        let coeffs = [0x3a, 0x04, 0xa5, 0x3b, 0xa4, 0xcd, 0x15];
        assert_eq!(
            rendered(&coeffs),
            "Random coefficients are 0x3a04a5..a4cd15 with a bit average of 0.45.\n"
        );
    }
}
