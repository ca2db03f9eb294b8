use serde::Deserialize;
use std::path::Path;

use super::error::ValidationError;

pub const DEFAULT_STEPS_PER_SIGMA: usize = 400;
pub const DEFAULT_TAIL_SIGMAS: f64 = 12.0;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Settings of the quadrature validator.
///
/// The integration range is `cmu ± tail_sigmas` cavity standard deviations, clipped to the
/// support of the potential. Simpson panels are `1 / steps_per_sigma` standard deviations
/// wide. All comparisons are absolute against `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidationConfig {
    pub steps_per_sigma: usize,
    pub tail_sigmas: f64,
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            steps_per_sigma: DEFAULT_STEPS_PER_SIGMA,
            tail_sigmas: DEFAULT_TAIL_SIGMAS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.steps_per_sigma == 0 {
            return Err(ValidationError::InvalidConfig {
                name: "steps_per_sigma",
                reason: "must be positive".to_string(),
            });
        }
        if !(self.tail_sigmas > 0.0 && self.tail_sigmas.is_finite()) {
            return Err(ValidationError::InvalidConfig {
                name: "tail_sigmas",
                reason: format!("must be positive and finite, got {}", self.tail_sigmas),
            });
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(ValidationError::InvalidConfig {
                name: "tolerance",
                reason: format!("must be positive and finite, got {}", self.tolerance),
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ValidationError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ValidationError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ValidationError> {
        let config: Self = toml::from_str(content).map_err(|e| ValidationError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Default)]
pub struct ValidationConfigBuilder {
    steps_per_sigma: Option<usize>,
    tail_sigmas: Option<f64>,
    tolerance: Option<f64>,
}

impl ValidationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps_per_sigma(mut self, steps: usize) -> Self {
        self.steps_per_sigma = Some(steps);
        self
    }
    pub fn tail_sigmas(mut self, sigmas: f64) -> Self {
        self.tail_sigmas = Some(sigmas);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<ValidationConfig, ValidationError> {
        let config = ValidationConfig {
            steps_per_sigma: self.steps_per_sigma.unwrap_or(DEFAULT_STEPS_PER_SIGMA),
            tail_sigmas: self.tail_sigmas.unwrap_or(DEFAULT_TAIL_SIGMAS),
            tolerance: self.tolerance.unwrap_or(DEFAULT_TOLERANCE),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builder_uses_defaults_for_unset_fields() {
        let config = ValidationConfigBuilder::new().tolerance(1e-8).build().unwrap();
        assert_eq!(config.steps_per_sigma, DEFAULT_STEPS_PER_SIGMA);
        assert_eq!(config.tail_sigmas, DEFAULT_TAIL_SIGMAS);
        assert_eq!(config.tolerance, 1e-8);
    }

    #[test]
    fn builder_rejects_zero_steps() {
        let result = ValidationConfigBuilder::new().steps_per_sigma(0).build();
        assert!(matches!(
            result,
            Err(ValidationError::InvalidConfig {
                name: "steps_per_sigma",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_non_finite_tail_and_tolerance() {
        assert!(matches!(
            ValidationConfigBuilder::new().tail_sigmas(f64::INFINITY).build(),
            Err(ValidationError::InvalidConfig {
                name: "tail_sigmas",
                ..
            })
        ));
        assert!(matches!(
            ValidationConfigBuilder::new().tolerance(f64::NAN).build(),
            Err(ValidationError::InvalidConfig {
                name: "tolerance",
                ..
            })
        ));
    }

    #[test]
    fn from_toml_str_reads_kebab_case_keys_and_fills_defaults() {
        let config = ValidationConfig::from_toml_str(
            r#"
            steps-per-sigma = 800
            tolerance = 1e-9
            "#,
        )
        .unwrap();
        assert_eq!(config.steps_per_sigma, 800);
        assert_eq!(config.tail_sigmas, DEFAULT_TAIL_SIGMAS);
        assert_eq!(config.tolerance, 1e-9);
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let result = ValidationConfig::from_toml_str("steps = 10");
        assert!(matches!(result, Err(ValidationError::Toml { .. })));
    }

    #[test]
    fn from_toml_str_validates_ranges() {
        let result = ValidationConfig::from_toml_str("tail-sigmas = -1.0");
        assert!(matches!(result, Err(ValidationError::InvalidConfig { .. })));
    }

    #[test]
    fn load_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("validation.toml");
        fs::write(&file_path, "tail-sigmas = 10.0\n").unwrap();

        let config = ValidationConfig::load(&file_path).unwrap();
        assert_eq!(config.tail_sigmas, 10.0);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("non_existent.toml");
        let result = ValidationConfig::load(&file_path);
        assert!(matches!(result, Err(ValidationError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.toml");
        fs::write(&file_path, "this is not toml").unwrap();
        let result = ValidationConfig::load(&file_path);
        assert!(matches!(result, Err(ValidationError::Toml { .. })));
    }
}
