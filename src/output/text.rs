//! Human-readable report rendering.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::enrichment::Enrichment;
use crate::output::{AnalysisReport, SpeciesReport};
use std::io::{self, Write};

/// Write an image analysis report.
pub fn write_analysis<W: Write>(out: &mut W, report: &AnalysisReport) -> io::Result<()> {
    let prediction = &report.prediction;

    writeln!(out, "Analysis Report: {}", report.source_file)?;
    writeln!(out)?;
    writeln!(out, "  Predicted species: {}", prediction.species)?;
    writeln!(
        out,
        "  Confidence:        {:.prec$}%",
        prediction.confidence,
        prec = DECIMAL_PLACES
    )?;
    if report.traits.likely_mimic {
        writeln!(out, "  Ecological trait:  This is likely a MIMIC species.")?;
    }
    if report.traits.likely_model {
        writeln!(
            out,
            "  Ecological trait:  This is likely a MODEL species (toxic)."
        )?;
    }
    writeln!(out)?;

    write_enrichment(out, &report.enrichment)
}

/// Write a species lookup report.
pub fn write_species<W: Write>(out: &mut W, report: &SpeciesReport) -> io::Result<()> {
    writeln!(out, "Species: {}", report.species)?;
    if report.in_index == Some(false) {
        writeln!(out, "  (not a species the classifier predicts)")?;
    }
    writeln!(out)?;

    write_enrichment(out, &report.enrichment)
}

fn write_enrichment<W: Write>(out: &mut W, enrichment: &Enrichment) -> io::Result<()> {
    writeln!(out, "Conservation & Facts")?;
    writeln!(
        out,
        "  Status:    {} {}",
        enrichment.conservation.status, enrichment.conservation.indicator
    )?;
    if let Some(summary) = &enrichment.encyclopedia {
        writeln!(out, "  Wikipedia: {}", summary.text)?;
        if let Some(url) = &summary.url {
            writeln!(out, "  Read more: {url}")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Geographic Habitat")?;
    match &enrichment.habitat {
        Some(habitat) => {
            writeln!(
                out,
                "  Location:  {:.4}, {:.4}",
                habitat.latitude, habitat.longitude
            )?;
            writeln!(out, "  Map:       {}", habitat.map_url)?;
        }
        None => writeln!(out, "  Habitat map not available.")?,
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enrichment::{ConservationReport, EncyclopediaSummary, HabitatReport};
    use crate::inference::PredictionResult;
    use crate::resources::{ConservationStatus, Coordinates};
    use std::path::Path;

    fn render_analysis(report: &AnalysisReport) -> String {
        let mut out = Vec::new();
        write_analysis(&mut out, report).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn prediction(mimic: f32, model: f32) -> PredictionResult {
        PredictionResult {
            species: "Viceroy".to_string(),
            species_id: 45,
            confidence: 91.234_56,
            mimic_probability: mimic,
            model_probability: model,
        }
    }

    fn enrichment(habitat: bool) -> Enrichment {
        Enrichment {
            conservation: ConservationReport::from(ConservationStatus::LeastConcern),
            habitat: habitat.then(|| {
                HabitatReport::from(Coordinates {
                    latitude: 41.8781,
                    longitude: -87.6298,
                })
            }),
            encyclopedia: Some(EncyclopediaSummary {
                text: "The viceroy is a North American butterfly.".to_string(),
                url: Some("https://en.wikipedia.org/wiki/Viceroy_(butterfly)".to_string()),
            }),
        }
    }

    #[test]
    fn test_analysis_report_contents() {
        let report =
            AnalysisReport::new(Path::new("/uploads/viceroy.jpg"), prediction(0.8, 0.2), enrichment(true));
        let text = render_analysis(&report);

        assert!(text.contains("Analysis Report: viceroy.jpg"));
        assert!(text.contains("Predicted species: Viceroy"));
        assert!(text.contains("91.23%"));
        assert!(text.contains("MIMIC"));
        assert!(!text.contains("MODEL species"));
        assert!(text.contains("Least Concern 🟢"));
        assert!(text.contains("Read more: https://en.wikipedia.org/wiki/Viceroy_(butterfly)"));
        assert!(text.contains("41.8781, -87.6298"));
    }

    #[test]
    fn test_both_traits_reported() {
        let report =
            AnalysisReport::new(Path::new("x.png"), prediction(0.9, 0.9), enrichment(true));
        let text = render_analysis(&report);
        assert!(text.contains("MIMIC"));
        assert!(text.contains("MODEL species (toxic)"));
    }

    #[test]
    fn test_missing_habitat() {
        let report =
            AnalysisReport::new(Path::new("x.png"), prediction(0.1, 0.1), enrichment(false));
        let text = render_analysis(&report);
        assert!(text.contains("Habitat map not available."));
        assert!(!text.contains("Ecological trait"));
    }

    #[test]
    fn test_species_report_offline() {
        let report = SpeciesReport {
            species: "Glasswing".to_string(),
            in_index: Some(false),
            enrichment: Enrichment {
                conservation: ConservationStatus::NotAvailable.into(),
                habitat: None,
                encyclopedia: None,
            },
        };
        let mut out = Vec::new();
        write_species(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Species: Glasswing"));
        assert!(text.contains("not a species the classifier predicts"));
        assert!(text.contains("Not Available ❓"));
        assert!(!text.contains("Wikipedia"));
    }
}
