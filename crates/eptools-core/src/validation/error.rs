use thiserror::Error;

use crate::core::potentials::params::ParamError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid validation setting '{name}': {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Parameter(#[from] ParamError),

    #[error("Moment computation failed numerically for cmu = {cmu}, crho = {crho}, eta = {eta}")]
    MomentFailure { cmu: f64, crho: f64, eta: f64 },

    #[error("Proximal map failed for h = {h}, rho = {rho}")]
    ProximalFailure { h: f64, rho: f64 },

    #[error("Quadrature mass {0} is not positive and finite")]
    DegenerateMass(f64),

    #[error("Potential does not provide {0}")]
    Unsupported(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
