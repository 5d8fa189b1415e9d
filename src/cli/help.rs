//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.model.path.exists() && config.model.labels.exists() {
        print_configured_help();
    } else {
        print_first_time_help(config);
    }
}

/// Print setup guide when the model files are not in place yet.
pub fn print_first_time_help(config: &Config) {
    println!("Model files not found. Get started with BioScan:");
    println!();
    println!("1. Initialize configuration:");
    println!("   bioscan config init");
    println!();
    println!("2. Point the configuration at the classifier and its labels:");
    println!("   model:  {}", config.model.path.display());
    println!(
        "   labels: {} (CSV with a '{}' column)",
        config.model.labels.display(),
        config.model.label_column
    );
    println!();
    println!("   or pass --model-path / --labels-path on the command line.");
    println!();
    println!("3. Analyze a photo:");
    println!("   bioscan monarch.jpg");
    println!();
    println!("Species data works without a model:");
    println!("   bioscan species info Monarch");
    println!("   bioscan lookup Monarch");
    println!();
    println!("Run 'bioscan -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: bioscan [IMAGES]... [OPTIONS]");
    println!();
    println!("Example: bioscan photos/ --format json --offline");
    println!();
    println!("Run 'bioscan -h' for all options or 'bioscan species list' to see known species.");
}
