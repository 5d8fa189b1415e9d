//! Configuration loading and management.

mod file;
mod types;
mod validate;

pub use file::{config_file_path, load_config_file, save_config};
pub use types::{
    Config, EncyclopediaConfig, ModelConfig, OutputConfig, OutputFormat, TablesConfig,
};
pub use validate::{validate_config, validate_model_config};
