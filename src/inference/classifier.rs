//! ONNX Runtime classifier.

use crate::constants::traits;
use crate::error::{Error, Result};
use crate::inference::{ButterflyModel, ImageTensor, ModelOutput};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Output index of the species distribution head.
const SPECIES_OUTPUT: usize = 0;

/// Output index of the trait head.
const TRAITS_OUTPUT: usize = 1;

/// Butterfly classifier backed by an ONNX Runtime session.
///
/// The model takes a `[1, 224, 224, 3]` float input and emits the species
/// distribution as output 0 and the `[mimic, model]` trait vector as
/// output 1.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    species_classes: Option<usize>,
}

impl OnnxClassifier {
    /// Load a model from an ONNX file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ModelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let session = Session::builder()
            .map_err(|e| Error::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .commit_from_file(path)
            .map_err(|e| Error::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let outputs = session.outputs();
        if outputs.len() < 2 {
            return Err(Error::ModelLoad {
                path: path.to_path_buf(),
                reason: format!(
                    "expected species and trait outputs, model has {} output(s)",
                    outputs.len()
                ),
            });
        }

        let species_classes = head_width(outputs[SPECIES_OUTPUT].dtype());
        debug!("Species head width: {:?}", species_classes);

        info!("Loaded model: {}", path.display());

        Ok(Self {
            session: Mutex::new(session),
            species_classes,
        })
    }
}

impl ButterflyModel for OnnxClassifier {
    fn infer(&self, input: &ImageTensor) -> Result<ModelOutput> {
        let tensor = Tensor::from_array((input.shape(), input.data().to_vec().into_boxed_slice()))
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let mut session = self.session.lock().map_err(|_| Error::Internal {
            message: "model session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_, species) = outputs[SPECIES_OUTPUT]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: format!("species output: {e}"),
            })?;
        let (_, trait_values) = outputs[TRAITS_OUTPUT]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: format!("trait output: {e}"),
            })?;

        let traits: [f32; traits::LEN] =
            trait_values.try_into().map_err(|_| Error::Inference {
                reason: format!(
                    "trait output has {} values, expected {}",
                    trait_values.len(),
                    traits::LEN
                ),
            })?;

        Ok(ModelOutput {
            species: species.to_vec(),
            traits,
        })
    }

    fn species_classes(&self) -> Option<usize> {
        self.species_classes
    }
}

/// Last dimension of a tensor output, when the model fixes it.
fn head_width(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| usize::try_from(d).ok())
            .filter(|&d| d > 0),
        _ => None,
    }
}
