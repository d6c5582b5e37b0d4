use serde::{Deserialize, Serialize};

/// Kind of production a location record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionType {
    Movie,
    TvShow,
}

/// Canonical filming-location record.
///
/// Constructed once by the normalizer and immutable afterwards. Optional
/// fields are `None` when a source did not provide them; no field ever
/// holds an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmingLocation {
    pub production_title: String,
    pub production_type: ProductionType,
    /// Identifier of the production in its source system (IMDb tt-id,
    /// TMDB numeric id). Forum-derived records have none.
    pub source_id: Option<String>,
    pub location_name: String,
    pub scene_description: Option<String>,
    /// Reserved: no current heuristic fills this in.
    pub address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub country: Option<String>,
    /// Provenance tag, e.g. "wikipedia:The Shawshank Redemption" or
    /// "reddit:MovieLocations".
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
}

/// Lightweight production metadata record from the TMDB source. Carries no
/// location information; used to seed the collection pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub title: String,
    #[serde(rename = "type")]
    pub production_type: ProductionType,
    pub tmdb_id: String,
    pub release_year: Option<i32>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
}
