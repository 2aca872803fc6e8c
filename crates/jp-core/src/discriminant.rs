//! Log-likelihood-ratio discriminants built from a tagger probability triple.
//!
//! Zero components are not guarded: `ln(0)` and `x / 0` give `±inf` or NaN,
//! which the histograms absorb into their flow slots.

use crate::jet::TagTriple;

/// `ln(p_b / p_u)`: b-jet versus light-jet separation.
#[inline]
pub fn anti_u(t: &TagTriple) -> f64 {
    (t.pb / t.pu).ln()
}

/// `ln(p_b / p_c)`: b-jet versus charm-jet separation.
#[inline]
pub fn anti_c(t: &TagTriple) -> f64 {
    (t.pb / t.pc).ln()
}

/// `ln(p_b / sqrt(p_c * p_u))`: combined b-likelihood.
#[inline]
pub fn gr1(t: &TagTriple) -> f64 {
    (t.pb / (t.pc * t.pu).sqrt()).ln()
}
