//! Progress indicators for image analysis.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner shown while an image is analyzed.
pub fn create_analysis_spinner(file_name: &str, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Analyzing butterfly in {file_name}..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Remove a spinner from the terminal.
pub fn finish_spinner(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
