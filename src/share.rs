//! Byte-parallel polynomial evaluation: turns a secret plus random
//! coefficients into N indexed text-line shares.

use crate::error::AppError;
use crate::gf256;
use std::io::Write;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn write_hex_byte(out: &mut Vec<u8>, b: u8) {
    out.push(HEX_DIGITS[(b >> 4) as usize]);
    out.push(HEX_DIGITS[(b & 0x0f) as usize]);
}

/// Evaluate, for share index `i`, the polynomial for secret byte `secret[p]`
/// whose non-constant coefficients are `coeffs[p*(t-1)..(p+1)*(t-1)]`, using
/// Horner's method over GF(2^8). `coeffs` is given highest-degree term
/// first, per §4.2.
fn eval_polynomial(i: u8, secret_byte: u8, coeffs: &[u8]) -> u8 {
    let mut y = 0u8;
    for &c in coeffs {
        y = gf256::mul(gf256::add(y, c), i);
    }
    gf256::add(y, secret_byte)
}

/// Encode `secret` into `n` shares, writing them as `writer` as
/// `ii-hh...hh\n` lines. `coeffs` must have length `secret.len() * (t - 1)`
/// where `t = coeffs.len() / secret.len() + 1`, with `2 <= t <= n <= 255`.
pub fn encode<W: Write>(
    secret: &[u8],
    coeffs: &[u8],
    n: u16,
    writer: &mut W,
) -> Result<(), AppError> {
    debug_assert!(!secret.is_empty());
    debug_assert_eq!(coeffs.len() % secret.len(), 0);
    let t_minus_1 = coeffs.len() / secret.len();
    debug_assert!((2..=255).contains(&(t_minus_1 + 1)));
    debug_assert!((t_minus_1 as u16 + 1..=255).contains(&n));

    let mut line = Vec::with_capacity(3 + secret.len() * 2);
    for idx in 1u16..=n {
        let i = idx as u8;
        line.clear();
        write_hex_byte(&mut line, i);
        line.push(b'-');
        for (p, &s) in secret.iter().enumerate() {
            let row = &coeffs[p * t_minus_1..(p + 1) * t_minus_1];
            let y = eval_polynomial(i, s, row);
            write_hex_byte(&mut line, y);
        }
        line.push(b'\n');
        writer.write_all(&line).map_err(AppError::Stdout)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_secret_zero_coefficients() {
        // with all coefficients zero, the share data is just the secret byte
        // repeated at every index, since the polynomial is constant.
        let secret = [0x42u8];
        let coeffs = [0u8; 2]; // t = 3
        let mut out = Vec::new();
        encode(&secret, &coeffs, 4, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "01-42\n02-42\n03-42\n04-42\n");
    }

    #[test]
    fn indices_start_at_one_never_emit_zero() {
        let secret = [0x00u8];
        let coeffs = [0x01u8];
        let mut out = Vec::new();
        encode(&secret, &coeffs, 3, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("01-"));
        assert!(!text.contains("00-"));
    }

    #[test]
    fn known_vector_matches_parser_example() {
        // constructed so that evaluating at x=1,9,3 with a linear polynomial
        // p(x) = c*x + s reproduces the parser's worked example in the spec
        // for a single byte column.
        let secret = [0x00u8];
        let coeffs = [0x10u8];
        let mut out = Vec::new();
        encode(&secret, &coeffs, 3, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next().unwrap(), "01-10");
    }
}
