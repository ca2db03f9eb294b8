use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("Invalid scale tau = {0}: must be at least 1e-12")]
    InvalidTau(f64),
    #[error("Invalid cavity precision {0}: must be at least 1e-14")]
    InvalidCavityPrecision(f64),
    #[error("Invalid fractional exponent eta = {0}: must lie in [1e-10, 1]")]
    InvalidEta(f64),
    #[error("Parameter buffer has length {actual}, expected at least {expected}")]
    ParameterCount { expected: usize, actual: usize },
}

/// Generic access to the scalar parameters of a potential.
///
/// The order of the parameter vector is fixed per potential type. Harnesses use this
/// to calibrate or fit parameters without knowing the concrete type.
pub trait ParameterizedPotential {
    fn num_pars(&self) -> usize;

    /// Writes the parameters into the first [`num_pars`](Self::num_pars) entries of `out`.
    fn get_pars(&self, out: &mut [f64]) -> Result<(), ParamError>;

    /// Sets all parameters from `pars`. On error no parameter is changed.
    fn set_pars(&mut self, pars: &[f64]) -> Result<(), ParamError>;

    /// Pure predicate: would [`set_pars`](Self::set_pars) accept `pars`?
    fn is_valid_pars(&self, pars: &[f64]) -> bool;
}

pub(crate) fn check_len(pars: &[f64], expected: usize) -> Result<(), ParamError> {
    if pars.len() < expected {
        return Err(ParamError::ParameterCount {
            expected,
            actual: pars.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_len_accepts_exact_and_longer_buffers() {
        assert!(check_len(&[0.0, 1.0], 2).is_ok());
        assert!(check_len(&[0.0, 1.0, 2.0], 2).is_ok());
    }

    #[test]
    fn check_len_reports_expected_and_actual_length() {
        assert_eq!(
            check_len(&[0.0], 2),
            Err(ParamError::ParameterCount {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn error_messages_name_the_threshold() {
        let msg = ParamError::InvalidTau(0.0).to_string();
        assert!(msg.contains("1e-12"));
        let msg = ParamError::InvalidEta(0.0).to_string();
        assert!(msg.contains("1e-10"));
    }
}
