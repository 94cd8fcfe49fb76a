use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::dal::song_db;

#[derive(Deserialize)]
pub struct SongPayload {
    pub title: String,
    pub artist: String,
    pub chord_content: String,
    pub source_url: Option<String>,
    pub personal_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct LibrarySearchQuery {
    q: Option<String>,
}

fn has_required_fields(song: &SongPayload) -> bool {
    !song.title.is_empty() && !song.artist.is_empty() && !song.chord_content.is_empty()
}

#[get("/songs")]
async fn get_songs(pool: web::Data<SqlitePool>) -> HttpResponse {
    match song_db::get_all_songs(&pool).await {
        Ok(songs) => HttpResponse::Ok().json(json!({ "songs": songs })),
        Err(e) => {
            log::error!("Failed to fetch songs: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch songs" }))
        }
    }
}

#[get("/songs/{id}")]
async fn get_song(path: web::Path<i64>, pool: web::Data<SqlitePool>) -> HttpResponse {
    match song_db::get_song_by_id(path.into_inner(), &pool).await {
        Ok(Some(song)) => HttpResponse::Ok().json(json!({ "song": song })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Song not found" })),
        Err(e) => {
            log::error!("Failed to fetch song: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to fetch song" }))
        }
    }
}

#[post("/songs")]
async fn save_song(body: web::Json<SongPayload>, pool: web::Data<SqlitePool>) -> HttpResponse {
    if !has_required_fields(&body) {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Title, artist, and chord content are required" }));
    }

    match song_db::insert_song(&body, &pool).await {
        Ok(created) => HttpResponse::Ok().json(json!({
            "message": "Song saved successfully",
            "id": created.id,
            "share_token": created.share_token,
        })),
        Err(e) => {
            log::error!("Failed to save song: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save song" }))
        }
    }
}

#[put("/songs/{id}")]
async fn update_song(
    path: web::Path<i64>,
    body: web::Json<SongPayload>,
    pool: web::Data<SqlitePool>,
) -> HttpResponse {
    if !has_required_fields(&body) {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Title, artist, and chord content are required" }));
    }

    match song_db::update_song(path.into_inner(), &body, &pool).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": "Song updated successfully" })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "Song not found" })),
        Err(e) => {
            log::error!("Failed to update song: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update song" }))
        }
    }
}

#[delete("/songs/{id}")]
async fn delete_song(path: web::Path<i64>, pool: web::Data<SqlitePool>) -> HttpResponse {
    match song_db::delete_song(path.into_inner(), &pool).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": "Song deleted successfully" })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "Song not found" })),
        Err(e) => {
            log::error!("Failed to delete song: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete song" }))
        }
    }
}

#[get("/search")]
async fn search_songs(
    query: web::Query<LibrarySearchQuery>,
    pool: web::Data<SqlitePool>,
) -> HttpResponse {
    let q = query.q.as_deref().unwrap_or("");

    if q.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Query parameter is required" }));
    }

    match song_db::search_songs(q, &pool).await {
        Ok(songs) => HttpResponse::Ok().json(json!({ "songs": songs })),
        Err(e) => {
            log::error!("Failed to search songs: {:?}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to search songs" }))
        }
    }
}
