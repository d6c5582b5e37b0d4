use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ScoutError, ScoutResult};
use crate::sources::FetchClient;

const BASE_URL: &str = "https://www.reddit.com";

/// Search a subreddit through the public JSON API. Returns the decoded
/// listing, or `None` when the API answers with a non-success status
/// (rate limiting included).
pub async fn search_subreddit(
    client: &FetchClient,
    subreddit: &str,
    query: &str,
    limit: u32,
) -> ScoutResult<Option<Value>> {
    let url = Url::parse(&format!("{}/r/{}/search.json", BASE_URL, subreddit))
        .map_err(|e| ScoutError::internal(format!("bad reddit url for r/{}: {}", subreddit, e)))?;

    let limit = limit.to_string();
    let params = [
        ("q", query),
        ("restrict_sr", "true"),
        ("sort", "relevance"),
        ("limit", limit.as_str()),
    ];

    debug!(subreddit, query, "searching subreddit");
    client.get_json(&url, &params).await
}
