//! Site sustainability records supplied by the external data provider.
//!
//! A [`SiteRecord`] is the metadata for one web domain: its popularity rank,
//! whether it is green-hosted, and a set of optional enrichment fields
//! (carbon estimates, hosting info, natural-language translations). The core
//! only consumes `rank`, `domain`, and `green`; everything else is carried
//! verbatim to the selection-display collaborator. Missing enrichment is not
//! an error and the core never substitutes fabricated values for it.
//!
//! The provider speaks camelCase JSON, so the serde names follow that.

use serde::{Deserialize, Serialize};

/// Sustainability metadata for one web domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    /// Popularity rank, unique within a batch. Optional because upstream
    /// ranking data is occasionally incomplete; size mapping substitutes a
    /// documented default instead of failing.
    #[serde(default)]
    pub rank: Option<u32>,
    pub domain: String,
    /// Green-hosting flag. Drives particle color and glow.
    #[serde(default)]
    pub green: bool,

    // Enrichment fields, pass-through only.
    #[serde(default)]
    pub co2_per_page_view: Option<f64>,
    #[serde(default)]
    pub energy_per_visit: Option<f64>,
    #[serde(default)]
    pub cleaner_than: Option<f64>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub hosted_by: Option<String>,
    #[serde(default)]
    pub hosted_by_website: Option<String>,
    #[serde(default)]
    pub co2_translation: Option<String>,
    #[serde(default)]
    pub energy_translation: Option<String>,
    #[serde(default)]
    pub cleaner_than_translation: Option<String>,
    #[serde(default)]
    pub website_description: Option<String>,
    #[serde(default)]
    pub carbon_impact: Option<CarbonImpact>,
}

impl SiteRecord {
    /// Minimal record with only the fields the core consumes.
    pub fn new(rank: u32, domain: &str, green: bool) -> Self {
        Self {
            rank: Some(rank),
            domain: domain.to_string(),
            green,
            co2_per_page_view: None,
            energy_per_visit: None,
            cleaner_than: None,
            rating: None,
            hosted_by: None,
            hosted_by_website: None,
            co2_translation: None,
            energy_translation: None,
            cleaner_than_translation: None,
            website_description: None,
            carbon_impact: None,
        }
    }
}

/// Icon + description pair summarizing a site's carbon impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonImpact {
    pub icon: String,
    pub description: String,
}

/// Parse a JSON batch of records as delivered by the data provider.
pub fn parse_batch(json: &str) -> serde_json::Result<Vec<SiteRecord>> {
    serde_json::from_str(json)
}
