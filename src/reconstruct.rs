//! Lagrange interpolation at x=0: turns a parsed `CoordArray` back into the
//! secret bytes.

use crate::error::AppError;
use crate::gf256;
use std::io::Write;

/// Reconstruct the secret from `coord`, a flat array of length `t * (1 + L)`
/// laid out as produced by [`crate::parser::parse`]: the first `t` bytes are
/// share indices, followed by `L` column-major blocks of `t` y-values each.
/// Writes the `L` secret bytes to `writer` in order.
pub fn reconstruct<W: Write>(coord: &[u8], t: usize, writer: &mut W) -> Result<(), AppError> {
    debug_assert!(coord.len() >= 2 * t, "CoordArray too short to interpolate");
    debug_assert_eq!(coord.len() % t, 0, "CoordArray length must be a multiple of t");

    let indices = &coord[0..t];
    debug_assert!(indices.iter().all(|&x| x != 0), "share index 0 is invalid");
    debug_assert!(
        {
            let mut sorted = indices.to_vec();
            sorted.sort_unstable();
            sorted.windows(2).all(|w| w[0] != w[1])
        },
        "share indices must be pairwise distinct"
    );

    let l = coord.len() / t - 1;
    let mut out = Vec::with_capacity(l);

    for p in 0..l {
        let ys = &coord[t * (1 + p)..t * (1 + p) + t];
        let mut s = 0u8;
        for i in 0..t {
            let mut phi = 1u8;
            for j in 0..t {
                if j == i {
                    continue;
                }
                let denom = gf256::add(indices[j], indices[i]);
                phi = gf256::mul(phi, gf256::mul(indices[j], gf256::inv(denom)));
            }
            s = gf256::add(s, gf256::mul(ys[i], phi));
        }
        out.push(s);
    }

    writer.write_all(&out).map_err(AppError::Stdout)
}
