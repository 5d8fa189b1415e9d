//! Model abstraction for the two-headed butterfly classifier.

use crate::constants::traits;
use crate::error::Result;
use crate::inference::ImageTensor;

/// Raw output of one forward pass.
///
/// Both heads come from the same invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    /// Probability distribution over species classes, indexed by class id.
    pub species: Vec<f32>,
    /// Independent trait probabilities: `[mimic, model]`.
    pub traits: [f32; traits::LEN],
}

/// A classifier that maps a preprocessed image to both output heads.
pub trait ButterflyModel: Send + Sync {
    /// Run a single forward pass.
    fn infer(&self, input: &ImageTensor) -> Result<ModelOutput>;

    /// Width of the species head, if the model declares a fixed one.
    fn species_classes(&self) -> Option<usize> {
        None
    }
}
