/// Smallest admissible scale `tau` of a Laplace potential.
pub const TAU_MIN: f64 = 1e-12;

/// Smallest admissible precision of the cavity (incoming Gaussian message).
pub const CAVITY_PRECISION_MIN: f64 = 1e-14;

/// Smallest admissible fractional exponent `eta`.
pub const ETA_MIN: f64 = 1e-10;

/// Largest admissible fractional exponent `eta` (a full EP update).
pub const ETA_MAX: f64 = 1.0;

/// True if `tau` is an admissible Laplace scale. NaN is rejected.
#[inline]
pub fn is_valid_tau(tau: f64) -> bool {
    tau >= TAU_MIN
}

/// True if `crho` is an admissible cavity precision. NaN is rejected.
#[inline]
pub fn is_valid_cavity_precision(crho: f64) -> bool {
    crho >= CAVITY_PRECISION_MIN
}

/// True if `eta` lies in `[ETA_MIN, ETA_MAX]`. NaN is rejected.
#[inline]
pub fn is_valid_eta(eta: f64) -> bool {
    (ETA_MIN..=ETA_MAX).contains(&eta)
}
