use tracing::{instrument, warn};

use super::moments::{MomentComputable, Moments, check_moment_args};
use super::params::{ParamError, ParameterizedPotential, check_len};
use super::quad::{Endpoint, Evaluation, QuadPotential};
use super::quantile_regress;
use crate::core::numeric::tolerances::is_valid_tau;

/// Laplace (double exponential) potential `t(s) = (tau/2) exp(-tau |y - s|)`.
///
/// Parameter vector order is `(y, tau)`, with `tau >= 1e-12`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplacePotential {
    y: f64,
    tau: f64,
}

impl Default for LaplacePotential {
    fn default() -> Self {
        Self { y: 0.0, tau: 1.0 }
    }
}

impl LaplacePotential {
    pub const NUM_PARS: usize = 2;

    pub fn new(y: f64, tau: f64) -> Result<Self, ParamError> {
        let mut pot = Self::default();
        pot.set_y(y);
        pot.set_tau(tau)?;
        Ok(pot)
    }

    pub fn with_pars(pars: &[f64]) -> Result<Self, ParamError> {
        let mut pot = Self::default();
        pot.set_pars(pars)?;
        Ok(pot)
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn set_tau(&mut self, tau: f64) -> Result<(), ParamError> {
        if !is_valid_tau(tau) {
            return Err(ParamError::InvalidTau(tau));
        }
        self.tau = tau;
        Ok(())
    }
}

impl ParameterizedPotential for LaplacePotential {
    fn num_pars(&self) -> usize {
        Self::NUM_PARS
    }

    fn get_pars(&self, out: &mut [f64]) -> Result<(), ParamError> {
        check_len(out, Self::NUM_PARS)?;
        out[0] = self.y;
        out[1] = self.tau;
        Ok(())
    }

    fn set_pars(&mut self, pars: &[f64]) -> Result<(), ParamError> {
        check_len(pars, Self::NUM_PARS)?;
        // Validate tau before touching y so a rejected call leaves both unchanged.
        if !is_valid_tau(pars[1]) {
            return Err(ParamError::InvalidTau(pars[1]));
        }
        self.set_y(pars[0]);
        self.set_tau(pars[1])
    }

    fn is_valid_pars(&self, pars: &[f64]) -> bool {
        pars.len() >= Self::NUM_PARS && is_valid_tau(pars[1])
    }
}

impl MomentComputable for LaplacePotential {
    fn supp_fractional(&self) -> bool {
        true
    }

    fn is_log_concave(&self) -> bool {
        true
    }

    /// `t(s)^eta` equals `C` times the quantile-regression potential with
    /// `kappa = 1/2`, `xi = 2 eta tau` and `C = (tau/2)^eta`.
    #[instrument(level = "trace", skip(self), fields(y = self.y, tau = self.tau))]
    fn comp_moments_fractional(
        &self,
        cmu: f64,
        crho: f64,
        eta: f64,
    ) -> Result<Option<Moments>, ParamError> {
        check_moment_args(crho, eta)?;

        let Some(moments) =
            quantile_regress::tilted_moments(cmu, crho, 2.0 * eta * self.tau, self.y, 0.5)
        else {
            warn!(
                "Laplace moment computation failed numerically (cmu = {}, crho = {}, eta = {}).",
                cmu, crho, eta
            );
            return Ok(None);
        };

        Ok(Some(Moments {
            log_z: moments.log_z + eta * (0.5 * self.tau).ln(),
            ..moments
        }))
    }
}

/// Soft shrinkage: `argmin_x kappa |x| + (x - mu)^2 / 2`.
#[inline]
pub fn soft_shrink(mu: f64, kappa: f64) -> f64 {
    if mu > kappa {
        mu - kappa
    } else if mu < -kappa {
        mu + kappa
    } else {
        0.0
    }
}

impl QuadPotential for LaplacePotential {
    fn has_first_derivatives(&self) -> bool {
        true
    }

    fn has_second_derivatives(&self) -> bool {
        true
    }

    fn has_way_points(&self) -> bool {
        true
    }

    /// All of R. The energy has a kink at `y`.
    fn support(&self, way_points: &mut Vec<f64>) -> (Endpoint, Endpoint) {
        way_points.clear();
        way_points.push(self.y);
        (Endpoint::Infinite, Endpoint::Infinite)
    }

    fn eval(&self, s: f64) -> Evaluation {
        let offset = -(0.5 * self.tau).ln();
        // s == y is treated like s > y; the subdifferential there is [-tau, tau].
        let (value, first) = if s >= self.y {
            (self.tau * (s - self.y) + offset, self.tau)
        } else {
            (self.tau * (self.y - s) + offset, -self.tau)
        };
        Evaluation {
            value,
            first: Some(first),
            second: Some(0.0),
        }
    }

    /// Closed-form l1 proximal map. Every `h` within `rho * tau` of `y` maps exactly
    /// onto the waypoint `y`.
    fn proximal(&self, h: f64, rho: f64) -> Option<f64> {
        Some(self.y + soft_shrink(h - self.y, rho * self.tau))
    }
}
