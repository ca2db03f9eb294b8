//! # Potentials Module
//!
//! Scalar potentials `t(s)` and the capabilities the inference loop relies on.
//!
//! ## Capabilities
//!
//! Each capability is a separate trait so that a potential can implement any subset and
//! each one can be tested on its own:
//!
//! - [`params::ParameterizedPotential`] - Generic parameter introspection used by
//!   calibration and fitting harnesses
//! - [`moments::MomentComputable`] - Tilted moments of `t(s)^eta * N(s)` under a
//!   Gaussian cavity message
//! - [`quad::QuadPotential`] - The energy `-log t(s)` with derivatives, its support and
//!   waypoints, and the proximal operator
//!
//! ## Concrete Potentials
//!
//! - [`laplace::LaplacePotential`] - `t(s) = (tau/2) exp(-tau |y - s|)`, with moments
//!   obtained from the [`quantile_regress`] kernel and a soft-shrinkage proximal map
//!
//! ## Error Classes
//!
//! Parameter validation failures are reported as [`params::ParamError`]. A numerical
//! failure of a moment computation is not an error: it is reported as `Ok(None)` and
//! callers are expected to skip or damp the update.

pub mod laplace;
pub mod moments;
pub mod params;
pub mod quad;
pub mod quantile_regress;
