//! Inference module for butterfly species classification.

mod classifier;
mod model;
mod prediction;
mod preprocess;

pub use classifier::OnnxClassifier;
pub use model::{ButterflyModel, ModelOutput};
pub use prediction::{PredictionResult, decode, predict};
pub use preprocess::{ImageTensor, decode_image, load_image, preprocess};
