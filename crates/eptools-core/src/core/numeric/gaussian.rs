use statrs::function::erf::erfc;
use std::f64::consts::{LN_2, PI, SQRT_2};

const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

// Below this argument erfc loses all precision and we switch to the asymptotic series.
const TAIL_SWITCH: f64 = -30.0;

#[inline]
pub fn log_normal_pdf(z: f64) -> f64 {
    -0.5 * z * z - LN_SQRT_2PI
}

#[inline]
pub fn normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// Asymptotic factor `Phi(z) * (-z) / phi(z)` for large negative `z`.
fn lower_tail_series(z: f64) -> f64 {
    let r = 1.0 / (z * z);
    1.0 - r * (1.0 - 3.0 * r * (1.0 - 5.0 * r * (1.0 - 7.0 * r)))
}

/// `log Phi(z)` for the standard normal CDF, accurate in both tails.
pub fn log_normal_cdf(z: f64) -> f64 {
    if z > 0.0 {
        (-0.5 * erfc(z / SQRT_2)).ln_1p()
    } else if z >= TAIL_SWITCH {
        erfc(-z / SQRT_2).ln() - LN_2
    } else {
        log_normal_pdf(z) - (-z).ln() + lower_tail_series(z).ln()
    }
}

/// Inverse Mills ratio `phi(z) / Phi(z)`.
///
/// Grows like `-z` as `z -> -inf` and decays to zero as `z -> inf`.
pub fn inv_mills_ratio(z: f64) -> f64 {
    if z >= TAIL_SWITCH {
        (log_normal_pdf(z) - log_normal_cdf(z)).exp()
    } else {
        -z / lower_tail_series(z)
    }
}

const FRACTION_DEPTH: u32 = 64;

/// Leading terms `(c1, c2)` of Laplace's continued fraction for the upper tail,
/// `phi(x) / (1 - Phi(x)) = x + c1` with `c1 = 1 / (x + c2)` and `c_k = k / (x + c_{k+1})`.
///
/// Intended for `x >= 5`, where 64 levels reach full double precision. The excess `c1`
/// and the truncated-normal variance factor `c1 * (c2 - c1)` come out without the
/// cancellation of `lambda - x` and `1 + x lambda - lambda^2`.
pub fn mills_fraction(x: f64) -> (f64, f64) {
    let mut c = 0.0;
    for k in (2..=FRACTION_DEPTH).rev() {
        c = f64::from(k) / (x + c);
    }
    (1.0 / (x + c), c)
}

/// `log(exp(a) + exp(b))` without overflow.
#[inline]
pub fn log_sum_exp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    hi + (lo - hi).exp().ln_1p()
}
