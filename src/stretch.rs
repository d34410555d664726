//! Stretching parameter for a target minimum spacing.
//!
//! Inverts `sin(δ)/δ = y` for δ with the closed-form approximation of
//! Vinokur (1983, J. Comput. Phys. 50, 215-234), one expansion on each side of
//! `STRETCH_THRESHOLD`. The result feeds the sinh/asinh distributions, where a
//! smaller target spacing yields a larger δ and tighter clustering.

use {crate::constants::STRETCH_THRESHOLD, std::f64::consts::PI};

const SMALL_Y: [f64; 7] = [
    1.0,
    -1.0,
    1.0,
    -(1.0 + PI * PI / 6.0),
    6.794_732,
    -13.205_501,
    11.726_095,
];

const LARGE_Y: [f64; 6] = [
    1.0,
    0.15,
    0.057_321_429,
    0.048_774_238,
    -0.053_337_753,
    0.075_845_134,
];

/// Returns the stretching parameter for a target spacing fraction `y` in (0, 1).
pub fn solve_stretch(y: f64) -> f64 {
    if y < STRETCH_THRESHOLD {
        PI * horner(&SMALL_Y, y)
    } else {
        let z = 1.0 - y;
        (6.0 * z).sqrt() * horner(&LARGE_Y, z)
    }
}

fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}
