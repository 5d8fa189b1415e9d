//! JSON envelope output.
//!
//! Each event is written as one JSON object per line so several images can
//! be streamed to a consumer.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Envelope format version.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct JsonEnvelope<T> {
    /// Envelope format version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Analysis of one image.
    Result,
    /// Species lookup without an image.
    SpeciesInfo,
    /// An image could not be analyzed.
    Error,
}

/// Payload for a failed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Image that failed.
    pub file: String,
    /// Error message.
    pub message: String,
}

/// Write one envelope as a single line.
pub fn write_event<W: Write, T: Serialize>(out: &mut W, event: EventType, payload: T) -> Result<()> {
    let envelope = JsonEnvelope::new(event, payload);
    serde_json::to_writer(&mut *out, &envelope).map_err(|e| Error::JsonWrite { source: e })?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrichment::{EncyclopediaSummary, Enrichment};
    use crate::inference::PredictionResult;
    use crate::output::AnalysisReport;
    use crate::resources::ConservationStatus;
    use std::path::Path;

    #[test]
    fn test_result_envelope() {
        let report = AnalysisReport::new(
            Path::new("monarch.jpg"),
            PredictionResult {
                species: "Monarch".to_string(),
                species_id: 24,
                confidence: 97.5,
                mimic_probability: 0.1,
                model_probability: 0.95,
            },
            Enrichment {
                conservation: ConservationStatus::Endangered.into(),
                habitat: None,
                encyclopedia: Some(EncyclopediaSummary::not_found()),
            },
        );

        let mut out = Vec::new();
        write_event(&mut out, EventType::Result, &report).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["spec_version"], "1.0");
        assert_eq!(value["event"], "result");
        assert_eq!(value["payload"]["source_file"], "monarch.jpg");
        assert_eq!(value["payload"]["prediction"]["species"], "Monarch");
        assert_eq!(value["payload"]["traits"]["likely_model"], true);
        assert_eq!(value["payload"]["traits"]["likely_mimic"], false);
        assert_eq!(value["payload"]["conservation"]["status"], "Endangered");
        assert_eq!(value["payload"]["conservation"]["indicator"], "🔴");
        assert!(value["payload"]["habitat"].is_null());
        assert_eq!(
            value["payload"]["encyclopedia"]["text"],
            "No Wikipedia article found."
        );
        assert!(value["payload"]["encyclopedia"]["url"].is_null());
    }

    #[test]
    fn test_error_envelope() {
        let mut out = Vec::new();
        write_event(
            &mut out,
            EventType::Error,
            ErrorPayload {
                file: "broken.jpg".to_string(),
                message: "image unreadable".to_string(),
            },
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["event"], "error");
        assert_eq!(value["payload"]["file"], "broken.jpg");
    }
}
