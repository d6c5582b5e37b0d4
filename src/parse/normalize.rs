//! Folds raw parser candidates into canonical [`FilmingLocation`] records.

use tracing::trace;

use crate::model::{FilmingLocation, ProductionType};
use crate::parse::country::CountryCanonicalizer;
use crate::parse::hierarchy::{self, SplitMode};
use crate::parse::strip_title_annotation;

/// Raw location strings below this length are noise, not locations.
const MIN_RAW_LEN: usize = 5;

/// Per-candidate context supplied by the orchestrator: which production the
/// candidate belongs to and how its source formats location strings.
#[derive(Debug, Clone)]
pub struct NormalizeContext<'a> {
    pub production_title: &'a str,
    pub production_type: ProductionType,
    pub source_id: Option<&'a str>,
    pub source_tag: Option<&'a str>,
    pub split_mode: SplitMode,
}

/// Record normalizer. Owns the country alias table; the hierarchy splitter
/// is stateless.
pub struct Normalizer {
    countries: CountryCanonicalizer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            countries: CountryCanonicalizer::new(),
        }
    }

    /// Build a canonical record from one raw candidate. Returns `None` for
    /// malformed candidates (too short, un-splittable); the caller skips
    /// them and moves on.
    pub fn normalize(
        &self,
        ctx: &NormalizeContext<'_>,
        raw_location: &str,
        scene: Option<String>,
    ) -> Option<FilmingLocation> {
        let raw = raw_location.trim();
        if raw.len() < MIN_RAW_LEN {
            trace!(raw, "candidate too short, skipping");
            return None;
        }

        let parts = hierarchy::split(raw, ctx.split_mode)?;
        // Alias matching runs over the whole raw string and takes
        // precedence over whatever position-based inference produced.
        let country = self.countries.apply(raw, parts.country);

        Some(FilmingLocation {
            production_title: strip_title_annotation(ctx.production_title),
            production_type: ctx.production_type,
            source_id: ctx.source_id.map(str::to_string),
            location_name: parts.name,
            scene_description: scene.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            address: None,
            city: parts.city,
            state_province: parts.state_province,
            country,
            source: ctx.source_tag.map(str::to_string),
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
