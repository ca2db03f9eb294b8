//! # Numeric Module
//!
//! Shared numerical building blocks for the potentials.
//!
//! - [`gaussian`] - Standard normal density, log-CDF and inverse Mills ratio
//! - [`tolerances`] - Parameter thresholds encoded in the potential contracts
//!
//! The thresholds in [`tolerances`] must match exactly: calibration code outside this
//! crate encodes the same values.

pub mod gaussian;
pub mod tolerances;
