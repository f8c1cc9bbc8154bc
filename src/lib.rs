// sss256 implements Shamir's secret sharing for arbitrarily sized secrets
// over GF(2^8), the field Rijndael/AES uses, reduced by x^8+x^4+x^3+x+1.
// A new random polynomial is drawn per secret byte; `t` of the `n` shares
// produced reconstruct the secret via Lagrange interpolation at x=0.

pub mod arena;
pub mod cli;
pub mod digest;
pub mod entropy;
pub mod error;
pub mod gf256;
pub mod parser;
pub mod reconstruct;
pub mod share;
pub mod writer;
