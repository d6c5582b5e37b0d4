use tracing::debug;
use url::Url;

use crate::error::{ScoutError, ScoutResult};
use crate::sources::FetchClient;

const BASE_URL: &str = "https://www.imdb.com";

/// Fetch the locations page for one title. `Ok(None)` when IMDb returns a
/// non-success status for the id.
pub async fn fetch_locations_page(
    client: &FetchClient,
    imdb_id: &str,
) -> ScoutResult<Option<String>> {
    let url = Url::parse(&format!("{}/title/{}/locations", BASE_URL, imdb_id))
        .map_err(|e| ScoutError::internal(format!("bad imdb url for {}: {}", imdb_id, e)))?;

    debug!(imdb_id, "fetching imdb locations page");
    client.get_text(&url).await
}
