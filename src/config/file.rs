//! Configuration file location, loading and saving.

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration file, used when `--config` is not given.
///
/// Lives in the platform config directory, e.g. `~/.config/bioscan/config.toml`
/// on Linux.
pub fn config_file_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(Error::ConfigDirNotFound)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_path_is_app_config_toml() {
        let path = config_file_path().unwrap();
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
        let parent = path.parent().unwrap();
        assert!(parent.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let config = load_config_file(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.encyclopedia.enabled);
        assert_eq!(config.model.label_column, "species_name");
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[model]
path = "/models/butterfly.onnx"
labels = "/models/master_labels.csv"

[tables]
habitat = "/data/habitat.json"

[encyclopedia]
language = "de"
timeout_secs = 3

[output]
format = "json"
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.model.path, PathBuf::from("/models/butterfly.onnx"));
        assert_eq!(config.model.label_column, "species_name");
        assert_eq!(
            config.tables.habitat,
            Some(PathBuf::from("/data/habitat.json"))
        );
        assert!(config.tables.conservation.is_none());
        assert_eq!(config.encyclopedia.language, "de");
        assert_eq!(config.encyclopedia.timeout_secs, 3);
        assert!(config.encyclopedia.enabled);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = load_config_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_save_then_load_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.encyclopedia.enabled = false;
        save_config(&config, &path).unwrap();

        let loaded = load_config_file(&path).unwrap();
        assert!(!loaded.encyclopedia.enabled);
    }
}
