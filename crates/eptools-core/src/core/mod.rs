//! # Core Module
//!
//! The computational foundation of eptools.
//!
//! - **Numerics** ([`numeric`]) - Gaussian density, log-CDF and inverse Mills ratio
//!   evaluated stably far into the tails, together with the numeric thresholds that
//!   are part of the potential contracts
//! - **Potentials** ([`potentials`]) - The capability traits every scalar potential
//!   implements and the concrete Laplace potential
//!
//! Everything in this module is synchronous and free of interior mutability. A
//! potential may be evaluated from several threads at once as long as nobody mutates
//! its parameters concurrently.

pub mod numeric;
pub mod potentials;
