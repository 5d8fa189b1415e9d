//! Decoding model output into a species prediction.

use crate::constants::{confidence, traits};
use crate::error::{Error, Result};
use crate::inference::{ButterflyModel, ModelOutput, preprocess};
use crate::resources::SpeciesIndex;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Species prediction for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted species name.
    pub species: String,
    /// Class id of the predicted species.
    pub species_id: usize,
    /// Probability of the predicted species as a percentage (0-100).
    pub confidence: f32,
    /// Probability that the butterfly is a mimic species (0-1).
    pub mimic_probability: f32,
    /// Probability that the butterfly is a model (toxic) species (0-1).
    pub model_probability: f32,
}

impl PredictionResult {
    /// Whether the mimic trait is likely.
    pub fn is_likely_mimic(&self) -> bool {
        self.mimic_probability > traits::FLAG_THRESHOLD
    }

    /// Whether the model-species trait is likely.
    ///
    /// Independent of [`Self::is_likely_mimic`]; both may hold at once.
    pub fn is_likely_model(&self) -> bool {
        self.model_probability > traits::FLAG_THRESHOLD
    }
}

/// Classify an image: preprocess, run the model once, decode.
pub fn predict(
    model: &dyn ButterflyModel,
    species: &SpeciesIndex,
    image: &DynamicImage,
) -> Result<PredictionResult> {
    let input = preprocess(image);
    let output = model.infer(&input)?;
    decode(&output, species)
}

/// Turn raw head outputs into a [`PredictionResult`].
///
/// The species id is the arg-max of the distribution; the first index wins
/// on ties and NaN never wins. Trait probabilities are taken as-is.
pub fn decode(output: &ModelOutput, species: &SpeciesIndex) -> Result<PredictionResult> {
    if output.species.len() > species.len() {
        return Err(Error::Inference {
            reason: format!(
                "species output has {} classes but the species index has {}",
                output.species.len(),
                species.len()
            ),
        });
    }

    let (species_id, max_probability) = arg_max(&output.species).ok_or_else(|| {
        Error::Inference {
            reason: "species output is empty or not finite".to_string(),
        }
    })?;

    let name = species.id_to_name(species_id).ok_or_else(|| Error::Inference {
        reason: format!(
            "predicted class {species_id} is outside the species index ({} species)",
            species.len()
        ),
    })?;

    let result = PredictionResult {
        species: name.to_string(),
        species_id,
        confidence: clamp_probability(max_probability) * confidence::MAX_PERCENT,
        mimic_probability: clamp_probability(output.traits[traits::MIMIC]),
        model_probability: clamp_probability(output.traits[traits::MODEL]),
    };

    debug!(
        "Decoded class {} ({}) at {:.2}%, mimic={:.3}, model={:.3}",
        result.species_id,
        result.species,
        result.confidence,
        result.mimic_probability,
        result.model_probability
    );

    Ok(result)
}

fn arg_max(values: &[f32]) -> Option<(usize, f32)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
}

fn clamp_probability(p: f32) -> f32 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
