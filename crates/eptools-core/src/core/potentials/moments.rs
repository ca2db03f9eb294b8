use super::params::ParamError;
use crate::core::numeric::tolerances::{is_valid_cavity_precision, is_valid_eta};

/// Moments of the tilted distribution `t(s)^eta * N(s; cmu, 1/crho) / Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    /// `log Z`, the log normalizer of the tilted distribution.
    pub log_z: f64,
}

/// Tilted-moment computation for EP message updates.
///
/// The cavity message is `N(s; cmu, 1/crho)`, given by its mean `cmu` and precision
/// `crho`. Implementations return:
///
/// - `Err(ParamError)` if `crho < 1e-14` or `eta` lies outside `[1e-10, 1]`. This is a
///   configuration error and must not be retried.
/// - `Ok(None)` if the moments could not be computed numerically. The caller should
///   skip the update, damp it, or fall back to a different rule for this iteration.
/// - `Ok(Some(moments))` otherwise.
pub trait MomentComputable {
    /// Whether `eta < 1` is supported by [`comp_moments_fractional`](Self::comp_moments_fractional).
    fn supp_fractional(&self) -> bool;

    fn is_log_concave(&self) -> bool;

    fn comp_moments_fractional(
        &self,
        cmu: f64,
        crho: f64,
        eta: f64,
    ) -> Result<Option<Moments>, ParamError>;

    /// Full update, `eta = 1`.
    fn comp_moments(&self, cmu: f64, crho: f64) -> Result<Option<Moments>, ParamError> {
        self.comp_moments_fractional(cmu, crho, 1.0)
    }
}

pub(crate) fn check_moment_args(crho: f64, eta: f64) -> Result<(), ParamError> {
    if !is_valid_cavity_precision(crho) {
        return Err(ParamError::InvalidCavityPrecision(crho));
    }
    if !is_valid_eta(eta) {
        return Err(ParamError::InvalidEta(eta));
    }
    Ok(())
}
