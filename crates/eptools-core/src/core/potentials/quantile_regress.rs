//! Tilted moments of the quantile-regression potential
//!
//! `t(s) = exp(-xi * rho_kappa(location - s))`, with the check loss
//! `rho_kappa(u) = kappa * u` for `u >= 0` and `(kappa - 1) * u` for `u < 0`,
//! under the cavity `N(s; cmu, 1/crho)`.
//!
//! Left of `location` the potential is `exp(xi * kappa * (s - location))`, right of it
//! `exp(-xi * (1 - kappa) * (s - location))`. Each side times the Gaussian is a scaled
//! truncated Gaussian, so the moments follow in closed form from the inverse Mills ratio.
//! Other potentials reduce to this kernel by parameter substitution.

use tracing::instrument;

use super::moments::Moments;
use crate::core::numeric::gaussian::{
    inv_mills_ratio, log_normal_cdf, log_normal_pdf, log_sum_exp, mills_fraction,
};

/// Mass and moments of `exp(slope * x) N(x; delta, var)` restricted to `x < 0`.
struct Piece {
    log_mass: f64,
    mean: f64,
    variance: f64,
}

// Below this standardized truncation point the continued fraction replaces the
// inverse Mills ratio, which cancels catastrophically in the mean and variance.
const FRACTION_SWITCH: f64 = -5.0;

fn lower_piece(delta: f64, var: f64, sd: f64, slope: f64) -> Piece {
    let shifted = delta + slope * var;
    let z = -shifted / sd;

    if z < FRACTION_SWITCH {
        let (excess, next) = mills_fraction(-z);
        return Piece {
            log_mass: log_normal_pdf(delta / sd) - (excess - z).ln(),
            mean: -sd * excess,
            variance: var * excess * (next - excess),
        };
    }

    let lambda = inv_mills_ratio(z);
    // For z < 0 the exponential prefactor and log Phi(z) nearly cancel, so fold them
    // into the density at the cavity mean instead.
    let log_mass = if z < 0.0 {
        log_normal_pdf(delta / sd) - lambda.ln()
    } else {
        slope * delta + 0.5 * slope * slope * var + log_normal_cdf(z)
    };
    Piece {
        log_mass,
        mean: shifted - sd * lambda,
        variance: (var * (1.0 - z * lambda - lambda * lambda)).max(0.0),
    }
}

/// Moments of `exp(-xi * rho_kappa(location - s)) N(s; cmu, 1/crho)`.
///
/// Returns `None` if `crho` or `xi` is not positive and finite, if `kappa` lies outside
/// `[0, 1]`, or if the result is not finite or the variance collapses to zero.
#[instrument(level = "trace", skip_all, fields(cmu, crho, xi, location, kappa))]
pub fn tilted_moments(cmu: f64, crho: f64, xi: f64, location: f64, kappa: f64) -> Option<Moments> {
    let admissible = crho > 0.0
        && crho.is_finite()
        && xi > 0.0
        && xi.is_finite()
        && (0.0..=1.0).contains(&kappa);
    if !admissible {
        return None;
    }

    let var = 1.0 / crho;
    let sd = var.sqrt();
    let delta = cmu - location;

    let left = lower_piece(delta, var, sd, xi * kappa);
    // Mirror x -> -x to reuse the lower piece for the right side.
    let right = lower_piece(-delta, var, sd, xi * (1.0 - kappa));

    let log_z = log_sum_exp(left.log_mass, right.log_mass);
    if !log_z.is_finite() {
        return None;
    }
    let w_left = (left.log_mass - log_z).exp();
    let w_right = (right.log_mass - log_z).exp();

    let right_mean = -right.mean;
    let mean = w_left * left.mean + w_right * right_mean;
    let gap = left.mean - right_mean;
    let variance =
        w_left * left.variance + w_right * right.variance + w_left * w_right * gap * gap;

    if !mean.is_finite() || !(variance > 0.0 && variance.is_finite()) {
        return None;
    }
    Some(Moments {
        mean: location + mean,
        variance,
        log_z,
    })
}
