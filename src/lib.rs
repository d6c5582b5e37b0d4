//! setscout - collects filming-location facts from public web sources
//!
//! The interesting part of this crate is the normalization layer: four
//! sources expose "where was this shot" in four different shapes (IMDb DOM
//! fragments, Reddit post free text, Wikipedia markup, TMDB metadata), and
//! `parse` + `collector` fold them all into one canonical
//! [`model::FilmingLocation`] record. Fetching (`sources`) and export are
//! thin wrappers around that core.

pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod parse;
pub mod sources;

// Re-export main types for convenience
pub use crate::collector::LocationCollector;
pub use crate::config::AppConfig;
pub use crate::error::{ScoutError, ScoutResult};
pub use crate::model::{FilmingLocation, ProductionType};
