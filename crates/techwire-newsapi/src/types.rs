use serde::Deserialize;

/// Top-level envelope of the `everything` endpoint.
///
/// On success `status` is `"ok"` and `articles` is populated; on failure
/// `status` is `"error"` and `code`/`message` describe the problem. NewsAPI
/// reports some errors in a 200 body, so both shapes must parse.
#[derive(Debug, Deserialize)]
pub(crate) struct EverythingResponse {
    pub status: String,
    #[serde(rename = "totalResults")]
    pub _total_results: Option<u32>,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// One article as returned by NewsAPI.
///
/// Every field is optional on the wire; the ingest pipeline decides which
/// articles are usable (title and url are required there).
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}
