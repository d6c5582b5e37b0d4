//! Thin fetch collaborators, one per public source. These do no parsing:
//! they return raw HTML, wikitext, or decoded JSON for the collector to
//! chew on, and they translate any non-success response into "no content".

pub mod client;
pub mod imdb;
pub mod reddit;
pub mod tmdb;
pub mod wikipedia;

pub use client::FetchClient;
