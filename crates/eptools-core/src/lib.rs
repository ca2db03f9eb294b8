//! # eptools Core Library
//!
//! Scalar potentials for expectation propagation (EP) style approximate inference.
//!
//! A potential is a non-negative univariate factor `t(s)` of a factorized model. The
//! surrounding inference loop needs two independent services from each potential:
//!
//! - **Tilted moments**: mean, variance and log partition function of
//!   `t(s)^eta * N(s)` under an incoming Gaussian message, used to update approximate
//!   marginals.
//! - **Quadrature / proximal view**: `-log t(s)` with its derivatives, the support
//!   interval and the non-smooth waypoints, plus the proximal operator of
//!   `-log t(s)`. This is used to validate moments numerically and by
//!   proximal-optimization based alternatives to moment matching.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Gaussian special functions, the contract tolerances,
//!   the capability traits and the concrete potentials.
//!
//! - **[`validation`]: The Checking Layer.** A quadrature-based validator that consumes the
//!   quadrature capability of a potential and cross-checks its closed-form moments and
//!   proximal map.

pub mod core;
pub mod validation;
