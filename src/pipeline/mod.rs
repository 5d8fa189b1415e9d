//! Processing pipeline components.

mod analyzer;
mod batch;
mod inputs;

pub use analyzer::analyze_image;
pub use batch::{BatchOptions, analyze_batch};
pub use inputs::{collect_input_files, is_image_file};
