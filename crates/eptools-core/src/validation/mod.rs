//! # Validation Module
//!
//! Numerical cross-checks for potentials, driven only by their capabilities.
//!
//! ## Overview
//!
//! Closed-form moment code is where sign errors and wrong constants hide. This module
//! integrates `exp(-eta * energy(s)) N(s; cmu, 1/crho)` directly by composite Simpson
//! quadrature, splitting the range at the waypoints the potential reports, and compares
//! the result with [`MomentComputable`](crate::core::potentials::moments::MomentComputable).
//! The proximal map is checked against the first-order optimality condition, using a
//! subgradient test when the proximal point sits on a waypoint.
//!
//! ## Key Components
//!
//! - [`config`] - Quadrature resolution, tail truncation and tolerance, with a builder
//!   and TOML loading
//! - [`quadrature`] - The validator operations
//! - [`error`] - Errors raised by the validator
//!
//! ```ignore
//! use eptools::core::potentials::laplace::LaplacePotential;
//! use eptools::validation::{config::ValidationConfig, quadrature::check_moments};
//!
//! let pot = LaplacePotential::new(0.0, 1.0)?;
//! let report = check_moments(&pot, 0.0, 1.0, 1.0, &ValidationConfig::default())?;
//! assert!(report.passed);
//! ```

pub mod config;
pub mod error;
pub mod quadrature;
