//! Species enrichment: conservation status, habitat and encyclopedia summary.
//!
//! None of these lookups fail. Unknown species and network problems turn
//! into well-defined "unknown" values so a report can always be rendered
//! from a successful prediction.

mod encyclopedia;

pub use encyclopedia::{Article, ArticleSource, WikipediaClient, parse_query_response};

use crate::constants::encyclopedia::{NOT_FOUND_TEXT, TITLE_SUFFIX};
use crate::resources::{ConservationStatus, Coordinates, ReferenceTables};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Short encyclopedia summary for a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncyclopediaSummary {
    /// First paragraph of the article, or the not-found text.
    pub text: String,
    /// Canonical article URL, if an article was found.
    pub url: Option<String>,
}

impl EncyclopediaSummary {
    /// Summary used when no article matches.
    pub fn not_found() -> Self {
        Self {
            text: NOT_FOUND_TEXT.to_string(),
            url: None,
        }
    }

    /// Whether an article was found.
    pub const fn is_found(&self) -> bool {
        self.url.is_some()
    }
}

/// Conservation status as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConservationReport {
    /// Status label.
    pub status: String,
    /// Indicator symbol.
    pub indicator: String,
}

impl From<ConservationStatus> for ConservationReport {
    fn from(status: ConservationStatus) -> Self {
        Self {
            status: status.label().to_string(),
            indicator: status.indicator().to_string(),
        }
    }
}

/// Habitat location as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitatReport {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Map link with a marker at the location.
    pub map_url: String,
}

impl From<Coordinates> for HabitatReport {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            map_url: coordinates.map_url(),
        }
    }
}

/// Everything known about a species beyond the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Conservation status.
    pub conservation: ConservationReport,
    /// Habitat location, if known.
    pub habitat: Option<HabitatReport>,
    /// Encyclopedia summary; absent when lookups are disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encyclopedia: Option<EncyclopediaSummary>,
}

/// Resolves enrichment data for species names.
///
/// Without an article source the resolver works offline and skips the
/// encyclopedia.
pub struct EnrichmentResolver<'a, S> {
    tables: &'a ReferenceTables,
    source: Option<&'a S>,
}

impl<'a, S: ArticleSource + Sync> EnrichmentResolver<'a, S> {
    /// Create a resolver. Pass `None` to work offline.
    pub const fn new(tables: &'a ReferenceTables, source: Option<&'a S>) -> Self {
        Self { tables, source }
    }

    /// Conservation status, `Not Available` for unknown species.
    pub fn conservation_status(&self, species: &str) -> ConservationStatus {
        self.tables.conservation.status(species)
    }

    /// Habitat location, `None` for unknown species.
    pub fn habitat(&self, species: &str) -> Option<Coordinates> {
        self.tables.habitat.location(species)
    }

    /// Encyclopedia summary.
    ///
    /// Tries `"<species> butterfly"` first, then the bare name. Request
    /// failures count as "no article" for that title.
    pub async fn encyclopedia_summary(&self, species: &str) -> EncyclopediaSummary {
        let Some(source) = self.source else {
            return EncyclopediaSummary::not_found();
        };

        for title in candidate_titles(species) {
            match source.fetch_article(&title).await {
                Ok(Some(article)) => {
                    debug!("Encyclopedia article for '{}': {}", species, article.title);
                    return EncyclopediaSummary {
                        text: article.first_paragraph().to_string(),
                        url: article.url,
                    };
                }
                Ok(None) => debug!("No encyclopedia article titled '{}'", title),
                Err(e) => warn!("Encyclopedia lookup for '{}' failed: {}", title, e),
            }
        }

        EncyclopediaSummary::not_found()
    }

    /// Resolve all enrichment for a species.
    pub async fn resolve(&self, species: &str) -> Enrichment {
        let encyclopedia = if self.source.is_some() {
            Some(self.encyclopedia_summary(species).await)
        } else {
            None
        };

        Enrichment {
            conservation: self.conservation_status(species).into(),
            habitat: self.habitat(species).map(Into::into),
            encyclopedia,
        }
    }
}

fn candidate_titles(species: &str) -> [String; 2] {
    [format!("{species}{TITLE_SUFFIX}"), species.to_string()]
}
