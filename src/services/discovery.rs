use crate::domain::{
    search_result::SearchResult,
    source::{classify_query, detect_source, ChordSource},
};

use super::{extract_amdm_chords, extract_ug_chords, scrape_amdm, scrape_ultimate_guitar};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const COULD_NOT_EXTRACT_MESSAGE: &str = "Could not extract chord content from this page.";
pub const ERROR_LOADING_MESSAGE: &str = "Error loading chord content.";
pub const NOT_SUPPORTED_MESSAGE: &str = "Chord extraction not supported for this site.";

/// Search the source selected for the query. A non-empty query never comes
/// back empty handed: when the source yields nothing the caller gets external
/// search links instead.
pub async fn search_chords(query: &str) -> Vec<SearchResult> {
    let results = match classify_query(query) {
        ChordSource::Amdm => scrape_amdm(query).await,
        ChordSource::UltimateGuitar => scrape_ultimate_guitar(query).await,
    };

    match results.is_empty() {
        true => fallback_results(query),
        false => results,
    }
}

/// Two fixed external search links, built from the query itself.
pub fn fallback_results(query: &str) -> Vec<SearchResult> {
    let encoded = urlencoding::encode(query);

    vec![
        SearchResult {
            title: format!("Search \"{}\" on Ultimate Guitar", query),
            artist: "External Link".to_string(),
            url: format!(
                "https://www.ultimate-guitar.com/search.php?search_type=title&value={}",
                encoded
            ),
            result_type: "Search".to_string(),
            source: "Ultimate Guitar".to_string(),
        },
        SearchResult {
            title: format!("Search \"{}\" on Chordify", query),
            artist: "External Link".to_string(),
            url: format!("https://chordify.net/search/{}", encoded),
            result_type: "Search".to_string(),
            source: "Chordify".to_string(),
        },
    ]
}

/// Dispatch a chord page URL to the extractor for its host. Unknown hosts get
/// the not-supported message without any fetch.
pub async fn extract_chord_content(url: &str) -> String {
    match detect_source(url) {
        Some(ChordSource::UltimateGuitar) => extract_ug_chords(url).await,
        Some(ChordSource::Amdm) => extract_amdm_chords(url).await,
        None => NOT_SUPPORTED_MESSAGE.to_string(),
    }
}
