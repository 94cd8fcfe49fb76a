use std::time::Duration;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::domain::{search_result::SearchResult, source::ChordSource};

use super::{COULD_NOT_EXTRACT_MESSAGE, ERROR_LOADING_MESSAGE, USER_AGENT};

const ORIGIN: &str = "https://amdm.ru";
const SEARCH_URL: &str = "https://amdm.ru/search/";
const RESULT_LIMIT: usize = 10;
const MIN_CONTENT_LEN: usize = 50;
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct AmdmSearchQuery {
    q: String,
}

pub async fn scrape_amdm(query: &str) -> Vec<SearchResult> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(SEARCH_TIMEOUT)
        .build()
        .unwrap();
    let search_query = AmdmSearchQuery {
        q: query.to_string(),
    };

    match client.get(SEARCH_URL).query(&search_query).send().await {
        Ok(res) => match res.error_for_status() {
            Ok(res) => match res.text().await {
                Ok(html) => parse_amdm_search_results(&html),
                Err(e) => {
                    log::error!("Failed to read AMDM.ru search response: {:?}", e);
                    vec![]
                }
            },
            Err(e) => {
                log::error!("AMDM.ru search returned error status: {:?}", e);
                vec![]
            }
        },
        Err(e) => {
            log::error!("AMDM.ru search request failed: {:?}", e);
            vec![]
        }
    }
}

/// Each result block holds one link whose text is "Artist - Title". Only the
/// first " - " separates the two; anything after it stays in the title.
pub fn parse_amdm_search_results(html: &str) -> Vec<SearchResult> {
    let result_selector = Selector::parse(".search_result").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    let document = Html::parse_document(html);
    let mut results: Vec<SearchResult> = vec![];

    for block in document.select(&result_selector) {
        if results.len() >= RESULT_LIMIT {
            break;
        }

        let link = match block.select(&link_selector).next() {
            Some(link) => link,
            None => continue,
        };
        let text = link.text().collect::<String>().trim().to_string();
        let url = link.value().attr("href").unwrap_or("").to_string();

        if text.is_empty() || url.is_empty() {
            continue;
        }

        let (artist, title) = match text.split_once(" - ") {
            Some((artist, title)) => (artist.to_string(), title.to_string()),
            None => ("Unknown".to_string(), text),
        };

        results.push(SearchResult {
            title,
            artist,
            url: match url.starts_with("http") {
                true => url,
                false => format!("{}{}", ORIGIN, url),
            },
            result_type: "Chords".to_string(),
            source: ChordSource::Amdm.label().to_string(),
        });
    }

    results
}

pub async fn extract_amdm_chords(url: &str) -> String {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(EXTRACT_TIMEOUT)
        .build()
        .unwrap();

    match client.get(url).send().await {
        Ok(res) => match res.error_for_status() {
            Ok(res) => match res.text().await {
                Ok(html) => extract_amdm_chords_from_html(&html)
                    .unwrap_or_else(|| COULD_NOT_EXTRACT_MESSAGE.to_string()),
                Err(e) => {
                    log::error!("Failed to read AMDM.ru chord page: {:?}", e);
                    ERROR_LOADING_MESSAGE.to_string()
                }
            },
            Err(e) => {
                log::error!("AMDM.ru chord page returned error status: {:?}", e);
                ERROR_LOADING_MESSAGE.to_string()
            }
        },
        Err(e) => {
            log::error!("Failed to load AMDM.ru chord page: {:?}", e);
            ERROR_LOADING_MESSAGE.to_string()
        }
    }
}

/// AMDM keeps the song text in a pre block or one of a few known containers.
pub fn extract_amdm_chords_from_html(html: &str) -> Option<String> {
    let pre_selector = Selector::parse("pre").unwrap();
    let container_selector = Selector::parse(".song_text, .chord_text, .song-text").unwrap();

    let document = Html::parse_document(html);

    let pre_content = selected_text(&document, &pre_selector);
    if is_usable(&pre_content) {
        return Some(pre_content);
    }

    let container_content = selected_text(&document, &container_selector);
    if is_usable(&container_content) {
        return Some(container_content);
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

#[cfg(test)]
mod tests {
    use super::{extract_amdm_chords_from_html, parse_amdm_search_results, RESULT_LIMIT};

    fn result_block(link_text: &str, href: &str) -> String {
        format!(
            r#"<div class="search_result"><a href="{}">{}</a></div>"#,
            href, link_text
        )
    }

    #[test]
    fn splits_artist_and_title_on_first_separator() {
        let html = result_block("Kino - Zvezda", "/akkordi/kino/zvezda/");
        let results = parse_amdm_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].artist, "Kino");
        assert_eq!(results[0].title, "Zvezda");
        assert_eq!(results[0].url, "https://amdm.ru/akkordi/kino/zvezda/");
        assert_eq!(results[0].result_type, "Chords");
        assert_eq!(results[0].source, "AMDM.ru");
    }

    #[test]
    fn title_keeps_everything_after_the_first_separator() {
        let html = result_block("Кино - Звезда - по имени Солнце", "/akkordi/kino/11063/");
        let results = parse_amdm_search_results(&html);

        assert_eq!(results[0].artist, "Кино");
        assert_eq!(results[0].title, "Звезда - по имени Солнце");
    }

    #[test]
    fn missing_separator_means_unknown_artist() {
        let html = result_block("Звезда по имени Солнце", "/akkordi/kino/11063/");
        let results = parse_amdm_search_results(&html);

        assert_eq!(results[0].artist, "Unknown");
        assert_eq!(results[0].title, "Звезда по имени Солнце");
    }

    #[test]
    fn absolute_links_are_kept() {
        let html = result_block("Kino - Zvezda", "https://amdm.ru/akkordi/kino/zvezda/");
        let results = parse_amdm_search_results(&html);

        assert_eq!(results[0].url, "https://amdm.ru/akkordi/kino/zvezda/");
    }

    #[test]
    fn blocks_without_links_or_text_are_skipped() {
        let html = format!(
            "{}{}{}",
            r#"<div class="search_result"><span>no link</span></div>"#,
            result_block("", "/akkordi/empty/"),
            result_block("Kino - Zvezda", "/akkordi/kino/zvezda/"),
        );
        let results = parse_amdm_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Zvezda");
    }

    #[test]
    fn caps_results_at_ten() {
        let blocks: String = (0..13)
            .map(|i| result_block(&format!("Artist - Song {}", i), &format!("/akkordi/{}/", i)))
            .collect();
        let results = parse_amdm_search_results(&blocks);

        assert_eq!(results.len(), RESULT_LIMIT);
        assert_eq!(results[9].title, "Song 9");
    }

    #[test]
    fn extracts_long_pre_content() {
        let chords = "Am            F\nЗакрой за мной дверь, я ухожу\nC             G\nЗакрой за мной дверь";
        let html = format!("<html><body><pre>{}</pre></body></html>", chords);

        assert_eq!(extract_amdm_chords_from_html(&html), Some(chords.to_string()));
    }

    #[test]
    fn short_pre_falls_through_to_song_text_container() {
        let chords = "Am F C G\nГруппа крови на рукаве, мой порядковый номер на рукаве";
        let html = format!(r#"<pre>Am F</pre><div class="song_text">{}</div>"#, chords);

        assert_eq!(extract_amdm_chords_from_html(&html), Some(chords.to_string()));
    }

    #[test]
    fn hyphenated_container_class_also_matches() {
        let chords = "Em C G D\nПеремен требуют наши сердца, перемен требуют наши глаза";
        let html = format!(r#"<div class="song-text">{}</div>"#, chords);

        assert_eq!(extract_amdm_chords_from_html(&html), Some(chords.to_string()));
    }

    #[test]
    fn unrecognized_page_structure_yields_none() {
        let html = "<html><body><p>404 страница не найдена</p></body></html>";

        assert_eq!(extract_amdm_chords_from_html(html), None);
    }
}
