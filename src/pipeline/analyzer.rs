//! Single-image analysis: decode, classify, enrich.

use crate::enrichment::{ArticleSource, EnrichmentResolver};
use crate::error::Result;
use crate::inference::load_image;
use crate::output::AnalysisReport;
use crate::resources::Resources;
use std::path::Path;
use tracing::{debug, info};

/// Analyze one image file.
///
/// Fails only if the image cannot be decoded or inference fails; enrichment
/// problems degrade to "unknown" values inside the report.
pub async fn analyze_image<S: ArticleSource + Sync>(
    path: &Path,
    resources: &Resources,
    resolver: &EnrichmentResolver<'_, S>,
) -> Result<AnalysisReport> {
    let image = load_image(path)?;
    debug!(
        "Decoded {}: {}x{}",
        path.display(),
        image.width(),
        image.height()
    );

    let prediction = resources.predict(&image)?;
    info!(
        "{}: {} ({:.2}%)",
        path.display(),
        prediction.species,
        prediction.confidence
    );

    let enrichment = resolver.resolve(&prediction.species).await;
    Ok(AnalysisReport::new(path, prediction, enrichment))
}
