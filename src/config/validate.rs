//! Configuration validation.

use crate::config::{Config, ModelConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_model_settings(&config.model)?;
    validate_encyclopedia(config)?;
    Ok(())
}

fn validate_model_settings(model: &ModelConfig) -> Result<()> {
    if model.label_column.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "model.label_column must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_encyclopedia(config: &Config) -> Result<()> {
    let encyclopedia = &config.encyclopedia;

    let language_ok = !encyclopedia.language.is_empty()
        && encyclopedia
            .language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !language_ok {
        return Err(Error::ConfigValidation {
            message: format!(
                "encyclopedia.language must be a Wikipedia language code, got '{}'",
                encyclopedia.language
            ),
        });
    }

    if encyclopedia.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "encyclopedia.timeout_secs must be at least 1".to_string(),
        });
    }

    if encyclopedia.user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "encyclopedia.user_agent must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Check that the model and label files exist.
pub fn validate_model_config(model: &ModelConfig) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound {
            path: model.path.clone(),
        });
    }

    if !model.labels.exists() {
        return Err(Error::LabelsFileNotFound {
            path: model.labels.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_label_column() {
        let mut config = Config::default();
        config.model.label_column = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_language() {
        let mut config = Config::default();
        config.encyclopedia.language = "en.evil.com/".to_string();
        assert!(validate_config(&config).is_err());

        config.encyclopedia.language = "zh-yue".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.encyclopedia.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_model_config_missing_model() {
        let model = ModelConfig {
            path: PathBuf::from("/nonexistent/model.onnx"),
            ..ModelConfig::default()
        };
        let result = validate_model_config(&model);
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }
}
