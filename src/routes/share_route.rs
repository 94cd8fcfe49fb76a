use actix_web::{get, web, HttpResponse};
use askama::Template;
use sqlx::SqlitePool;

use crate::dal::song_db::{self, SongRow};

#[derive(Template)]
#[template(path = "share.html")]
struct SharePageTemplate {
    song: SongRow,
}

#[derive(Template)]
#[template(path = "share_not_found.html")]
struct ShareNotFoundTemplate;

#[get("/share/{share_token}")]
async fn share_song(path: web::Path<String>, pool: web::Data<SqlitePool>) -> HttpResponse {
    match song_db::get_song_by_share_token(&path.into_inner(), &pool).await {
        Ok(Some(song)) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(SharePageTemplate { song }.render().unwrap()),
        Ok(None) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(ShareNotFoundTemplate.render().unwrap()),
        Err(e) => {
            log::error!("Failed to load shared song: {:?}", e);
            HttpResponse::InternalServerError().body("Error loading shared song")
        }
    }
}
