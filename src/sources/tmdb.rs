use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::error::{ScoutError, ScoutResult};
use crate::model::{ProductionSummary, ProductionType};
use crate::sources::FetchClient;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Fetch popular-movie metadata from TMDB. Without an API key this falls
/// back to a small built-in sample so the rest of the pipeline can run
/// offline.
pub async fn fetch_popular_movies(
    client: &FetchClient,
    api_key: Option<&str>,
    page: u32,
) -> ScoutResult<Vec<ProductionSummary>> {
    let Some(api_key) = api_key else {
        info!("no TMDB API key configured, using sample data");
        return Ok(sample_productions());
    };

    let url = Url::parse(&format!("{}/movie/popular", BASE_URL))
        .map_err(|e| ScoutError::internal(format!("bad tmdb url: {}", e)))?;
    let page = page.to_string();
    let params = [("api_key", api_key), ("page", page.as_str())];

    debug!(%page, "fetching popular movies from tmdb");
    let Some(data) = client.get_json(&url, &params).await? else {
        return Ok(Vec::new());
    };

    let summaries = data
        .get("results")
        .and_then(Value::as_array)
        .map(|results| results.iter().filter_map(summary_from_result).collect())
        .unwrap_or_default();

    Ok(summaries)
}

fn summary_from_result(movie: &Value) -> Option<ProductionSummary> {
    let title = movie.get("title").and_then(Value::as_str)?;
    let id = movie.get("id").and_then(Value::as_i64)?;

    let release_year = movie
        .get("release_date")
        .and_then(Value::as_str)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| {
            use chrono::Datelike;
            d.year()
        });

    let poster_url = movie
        .get("poster_path")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", POSTER_BASE, p));

    Some(ProductionSummary {
        title: title.to_string(),
        production_type: ProductionType::Movie,
        tmdb_id: id.to_string(),
        release_year,
        description: movie
            .get("overview")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        poster_url,
    })
}

/// Built-in sample titles for keyless runs.
fn sample_productions() -> Vec<ProductionSummary> {
    vec![
        ProductionSummary {
            title: "The Shawshank Redemption".to_string(),
            production_type: ProductionType::Movie,
            tmdb_id: "111161".to_string(),
            release_year: Some(1994),
            description: Some("Imprisoned in Shawshank State Penitentiary".to_string()),
            poster_url: None,
        },
        ProductionSummary {
            title: "Breaking Bad".to_string(),
            production_type: ProductionType::TvShow,
            tmdb_id: "903747".to_string(),
            release_year: Some(2008),
            description: Some("A high school chemistry teacher".to_string()),
            poster_url: None,
        },
        ProductionSummary {
            title: "Stranger Things".to_string(),
            production_type: ProductionType::TvShow,
            tmdb_id: "4574334".to_string(),
            release_year: Some(2016),
            description: Some("When a young boy vanishes".to_string()),
            poster_url: None,
        },
    ]
}
