use std::time::Duration;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::domain::{search_result::SearchResult, source::ChordSource};

use super::{COULD_NOT_EXTRACT_MESSAGE, ERROR_LOADING_MESSAGE, USER_AGENT};

const ORIGIN: &str = "https://www.ultimate-guitar.com";
const SEARCH_URL: &str = "https://www.ultimate-guitar.com/search.php";
const RESULT_LIMIT: usize = 10;
const MIN_CONTENT_LEN: usize = 50;
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct UgSearchQuery {
    search_type: &'static str,
    value: String,
}

pub async fn scrape_ultimate_guitar(query: &str) -> Vec<SearchResult> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(SEARCH_TIMEOUT)
        .build()
        .unwrap();
    let search_query = UgSearchQuery {
        search_type: "title",
        value: query.to_string(),
    };

    match client.get(SEARCH_URL).query(&search_query).send().await {
        Ok(res) => match res.error_for_status() {
            Ok(res) => match res.text().await {
                Ok(html) => parse_ug_search_results(&html),
                Err(e) => {
                    log::error!("Failed to read Ultimate Guitar search response: {:?}", e);
                    vec![]
                }
            },
            Err(e) => {
                log::error!("Ultimate Guitar search returned error status: {:?}", e);
                vec![]
            }
        },
        Err(e) => {
            log::error!("Ultimate Guitar search request failed: {:?}", e);
            vec![]
        }
    }
}

/// Walk the result cards in document order, capped at 10. Cards past the cap
/// are never parsed.
pub fn parse_ug_search_results(html: &str) -> Vec<SearchResult> {
    let card_selector = Selector::parse("article.dNNhl").unwrap();
    let title_selector = Selector::parse("a.fZjdD").unwrap();
    let artist_selector = Selector::parse("a.c5K8n").unwrap();
    let type_selector = Selector::parse(".tdi3Y").unwrap();

    let document = Html::parse_document(html);
    let mut results: Vec<SearchResult> = vec![];

    for card in document.select(&card_selector) {
        if results.len() >= RESULT_LIMIT {
            break;
        }

        let title_link = match card.select(&title_selector).next() {
            Some(link) => link,
            None => continue,
        };
        let title = title_link.text().collect::<String>().trim().to_string();
        let url = title_link.value().attr("href").unwrap_or("").to_string();
        let artist = card
            .select(&artist_selector)
            .next()
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let result_type = card
            .select(&type_selector)
            .next()
            .map(|tag| tag.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if title.is_empty() || artist.is_empty() || url.is_empty() {
            continue;
        }

        results.push(SearchResult {
            title,
            artist,
            url: match url.starts_with("http") {
                true => url,
                false => format!("{}{}", ORIGIN, url),
            },
            result_type: match result_type.is_empty() {
                true => "Chords".to_string(),
                false => result_type,
            },
            source: ChordSource::UltimateGuitar.label().to_string(),
        });
    }

    results
}

pub async fn extract_ug_chords(url: &str) -> String {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(EXTRACT_TIMEOUT)
        .build()
        .unwrap();

    match client.get(url).send().await {
        Ok(res) => match res.error_for_status() {
            Ok(res) => match res.text().await {
                Ok(html) => extract_ug_chords_from_html(&html)
                    .unwrap_or_else(|| COULD_NOT_EXTRACT_MESSAGE.to_string()),
                Err(e) => {
                    log::error!("Failed to read Ultimate Guitar chord page: {:?}", e);
                    ERROR_LOADING_MESSAGE.to_string()
                }
            },
            Err(e) => {
                log::error!("Ultimate Guitar chord page returned error status: {:?}", e);
                ERROR_LOADING_MESSAGE.to_string()
            }
        },
        Err(e) => {
            log::error!("Failed to load Ultimate Guitar chord page: {:?}", e);
            ERROR_LOADING_MESSAGE.to_string()
        }
    }
}

/// Ordered heuristics over a fetched chord page. Each later step runs only
/// when the earlier ones produced nothing usable.
pub fn extract_ug_chords_from_html(html: &str) -> Option<String> {
    let pre_selector = Selector::parse("pre").unwrap();
    let tab_selector = Selector::parse(
        ".js-tab-content pre, .js-tab-content code, [data-name=\"tab-content\"] pre",
    )
    .unwrap();
    let script_selector = Selector::parse("script").unwrap();

    let document = Html::parse_document(html);

    let pre_content = selected_text(&document, &pre_selector);
    if is_usable(&pre_content) {
        return Some(pre_content);
    }

    let tab_content = selected_text(&document, &tab_selector);
    if is_usable(&tab_content) {
        return Some(tab_content);
    }

    // Chord data sometimes only exists inside the page's embedded JS store.
    for script in document.select(&script_selector) {
        let body: String = script.text().collect();
        if body.contains("tab_view_type") && body.contains("content") {
            if let Some(raw) = match_content_field(&body) {
                return Some(unescape_embedded_content(raw));
            }
        }
    }

    None
}

fn selected_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .flat_map(|tag| tag.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_usable(content: &str) -> bool {
    content.chars().count() > MIN_CONTENT_LEN
}

/// Find the first "content":"…" value in a script body. The value ends at the
/// next double quote, so escaped quotes inside it terminate the match early.
fn match_content_field(script: &str) -> Option<&str> {
    const KEY: &str = "\"content\":\"";
    let start = script.find(KEY)? + KEY.len();
    let rest = &script[start..];
    let end = rest.find('"')?;
    match end {
        0 => None,
        _ => Some(&rest[..end]),
    }
}

fn unescape_embedded_content(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\t", "\t").replace('\\', "")
}

#[cfg(test)]
mod tests {
    use super::{extract_ug_chords_from_html, parse_ug_search_results, RESULT_LIMIT};

    fn result_card(title: &str, artist: &str, href: &str, tab_type: &str) -> String {
        format!(
            r#"<article class="dNNhl">
                <a class="fZjdD" href="{}">{}</a>
                <a class="c5K8n">{}</a>
                <div class="tdi3Y">{}</div>
            </article>"#,
            href, title, artist, tab_type
        )
    }

    #[test]
    fn parses_title_artist_url_and_type() {
        let html = format!(
            "<html><body>{}</body></html>",
            result_card("Wonderwall", "Oasis", "/tab/oasis/wonderwall-chords-1112", "Chords")
        );
        let results = parse_ug_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Wonderwall");
        assert_eq!(results[0].artist, "Oasis");
        assert_eq!(
            results[0].url,
            "https://www.ultimate-guitar.com/tab/oasis/wonderwall-chords-1112"
        );
        assert_eq!(results[0].result_type, "Chords");
        assert_eq!(results[0].source, "Ultimate Guitar");
    }

    #[test]
    fn keeps_absolute_urls_untouched() {
        let html = result_card(
            "Wonderwall",
            "Oasis",
            "https://tabs.ultimate-guitar.com/tab/1112",
            "Tab",
        );
        let results = parse_ug_search_results(&html);

        assert_eq!(results[0].url, "https://tabs.ultimate-guitar.com/tab/1112");
        assert_eq!(results[0].result_type, "Tab");
    }

    #[test]
    fn missing_type_label_defaults_to_chords() {
        let html = r#"<article class="dNNhl">
            <a class="fZjdD" href="/tab/1">Song</a>
            <a class="c5K8n">Artist</a>
        </article>"#;
        let results = parse_ug_search_results(html);

        assert_eq!(results[0].result_type, "Chords");
    }

    #[test]
    fn skips_cards_with_missing_fields() {
        let html = format!(
            "{}{}{}",
            // No artist element at all.
            r#"<article class="dNNhl"><a class="fZjdD" href="/tab/1">Song</a></article>"#,
            // Artist present but blank.
            result_card("Song Two", " ", "/tab/2", "Chords"),
            result_card("Song Three", "Artist", "/tab/3", "Chords"),
        );
        let results = parse_ug_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Song Three");
    }

    #[test]
    fn caps_results_at_ten_in_document_order() {
        let cards: String = (0..14)
            .map(|i| result_card(&format!("Song {}", i), "Artist", &format!("/tab/{}", i), "Chords"))
            .collect();
        let results = parse_ug_search_results(&cards);

        assert_eq!(results.len(), RESULT_LIMIT);
        assert_eq!(results[0].title, "Song 0");
        assert_eq!(results[9].title, "Song 9");
    }

    #[test]
    fn extracts_long_pre_content() {
        let chords = "[Verse]\nEm7  G  Dsus4  A7sus4\nToday is gonna be the day...";
        let html = format!("<html><body><pre>{}</pre></body></html>", chords);

        assert_eq!(extract_ug_chords_from_html(&html), Some(chords.to_string()));
    }

    #[test]
    fn short_pre_falls_through_to_tab_container() {
        let chords = "[Chorus]\nC  D  G  Em\nBecause maybe, you're gonna be the one that saves me";
        let html = format!(
            r#"<pre>Em G</pre><div class="js-tab-content"><code>{}</code></div>"#,
            chords
        );

        assert_eq!(extract_ug_chords_from_html(&html), Some(chords.to_string()));
    }

    #[test]
    fn falls_back_to_script_embedded_content() {
        let html = r#"<script>
            window.UGAPP = {"tab_view_type":"chords","content":"[Verse]\nEm7 G\nToday\tis gonna be the day"};
        </script>"#;

        assert_eq!(
            extract_ug_chords_from_html(html),
            Some("[Verse]\nEm7 G\nToday\tis gonna be the day".to_string())
        );
    }

    #[test]
    fn script_without_marker_token_is_ignored() {
        let html = r#"<script>var data = {"content":"[Verse]\nEm7 G"};</script>"#;

        assert_eq!(extract_ug_chords_from_html(html), None);
    }

    #[test]
    fn unrecognized_page_structure_yields_none() {
        let html = "<html><body><div>Nothing chord shaped here</div></body></html>";

        assert_eq!(extract_ug_chords_from_html(html), None);
    }
}
