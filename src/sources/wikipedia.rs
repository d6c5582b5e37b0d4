use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ScoutError, ScoutResult};
use crate::sources::FetchClient;

const API_URL: &str = "https://en.wikipedia.org/w/api.php";

fn api_url() -> ScoutResult<Url> {
    Url::parse(API_URL).map_err(|e| ScoutError::internal(format!("bad wikipedia api url: {}", e)))
}

/// Search for film/TV articles matching a query. Returns matching page
/// titles, empty when the API had nothing.
pub async fn search_film_articles(
    client: &FetchClient,
    query: &str,
    limit: u32,
) -> ScoutResult<Vec<String>> {
    let search = format!("{} film OR movie OR \"TV series\"", query);
    let limit = limit.to_string();
    let params = [
        ("action", "query"),
        ("format", "json"),
        ("list", "search"),
        ("srsearch", search.as_str()),
        ("srlimit", limit.as_str()),
    ];

    debug!(query, "searching wikipedia for film articles");
    let Some(data) = client.get_json(&api_url()?, &params).await? else {
        return Ok(Vec::new());
    };

    let titles = data
        .pointer("/query/search")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("title").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(titles)
}

/// Fetch a page's raw wikitext (main revision slot). `None` when the page
/// does not exist or carries no revisions.
pub async fn fetch_page_wikitext(
    client: &FetchClient,
    page_title: &str,
) -> ScoutResult<Option<String>> {
    let params = [
        ("action", "query"),
        ("format", "json"),
        ("prop", "revisions"),
        ("titles", page_title),
        ("rvprop", "content"),
        ("rvslots", "main"),
    ];

    debug!(page_title, "fetching wikipedia page content");
    let Some(data) = client.get_json(&api_url()?, &params).await? else {
        return Ok(None);
    };

    let pages = data
        .pointer("/query/pages")
        .and_then(Value::as_object);

    let Some(pages) = pages else {
        return Ok(None);
    };

    // Keyed by page id; take the first (and only) entry.
    let content = pages.values().next().and_then(|page| {
        page.pointer("/revisions/0/slots/main/*")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    Ok(content)
}

/// List main-namespace article titles in a category.
pub async fn fetch_category_members(
    client: &FetchClient,
    category: &str,
) -> ScoutResult<Vec<String>> {
    let params = [
        ("action", "query"),
        ("format", "json"),
        ("list", "categorymembers"),
        ("cmtitle", category),
        ("cmlimit", "500"),
    ];

    debug!(category, "fetching wikipedia category members");
    let Some(data) = client.get_json(&api_url()?, &params).await? else {
        return Ok(Vec::new());
    };

    let titles = data
        .pointer("/query/categorymembers")
        .and_then(Value::as_array)
        .map(|members| {
            members
                .iter()
                // Only main-namespace articles carry filming sections.
                .filter(|m| m.get("ns").and_then(Value::as_i64) == Some(0))
                .filter_map(|m| m.get("title").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(titles)
}
