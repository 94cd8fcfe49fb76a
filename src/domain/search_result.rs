use serde::Serialize;

/// One candidate entry parsed from a source's search-results page, or a
/// synthesized external search link when a source came up empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub artist: String,
    pub url: String,
    #[serde(rename = "type")]
    pub result_type: String,
    pub source: String,
}
