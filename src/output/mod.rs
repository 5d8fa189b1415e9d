//! Report writers.

pub mod json;
pub mod progress;
mod report;
pub mod text;

pub use report::{AnalysisReport, SpeciesReport, TraitFlags};
