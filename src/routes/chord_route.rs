use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::services::discovery;

#[derive(Deserialize)]
pub struct ChordSearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct ExtractChordsBody {
    url: Option<String>,
}

#[get("/chords")]
async fn search_chords(query: web::Query<ChordSearchQuery>) -> HttpResponse {
    let q = query.q.as_deref().unwrap_or("");

    if q.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Query parameter is required" }));
    }

    let results = discovery::search_chords(q).await;
    HttpResponse::Ok().json(json!({ "results": results }))
}

#[post("/extract-chords")]
async fn extract_chords(body: web::Json<ExtractChordsBody>) -> HttpResponse {
    let url = body.url.as_deref().unwrap_or("");

    if url.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "URL is required" }));
    }

    let chord_content = discovery::extract_chord_content(url).await;
    HttpResponse::Ok().json(json!({ "chord_content": chord_content }))
}
