use url::Url;

/// One external chords site the finder knows how to query and scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordSource {
    UltimateGuitar,
    Amdm,
}

impl ChordSource {
    pub fn label(&self) -> &'static str {
        match self {
            ChordSource::UltimateGuitar => "Ultimate Guitar",
            ChordSource::Amdm => "AMDM.ru",
        }
    }
}

pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c))
}

/// Route a query to a source. Cyrillic queries go to the Russian site,
/// everything else to Ultimate Guitar. Total over all inputs; empty queries
/// are rejected at the HTTP boundary before this runs.
pub fn classify_query(query: &str) -> ChordSource {
    match has_cyrillic(query) {
        true => ChordSource::Amdm,
        false => ChordSource::UltimateGuitar,
    }
}

/// Pick the extractor for a chord page URL by its host. Unknown hosts and
/// unparseable URLs yield None so no fetch is attempted for them.
pub fn detect_source(url: &str) -> Option<ChordSource> {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if host.contains("ultimate-guitar.com") => {
                Some(ChordSource::UltimateGuitar)
            }
            Some(host) if host.contains("amdm.ru") => Some(ChordSource::Amdm),
            _ => None,
        },
        Err(_) => None,
    }
}
