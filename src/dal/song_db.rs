use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::routes::song_route::SongPayload;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SongRow {
    pub id: i64,
    pub share_token: String,
    pub title: String,
    pub artist: String,
    pub chord_content: String,
    pub source_url: Option<String>,
    pub personal_notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct CreatedSong {
    pub id: i64,
    pub share_token: String,
}

pub async fn init_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            share_token TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            chord_content TEXT NOT NULL,
            source_url TEXT,
            personal_notes TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn insert_song(song: &SongPayload, pool: &SqlitePool) -> Result<CreatedSong, sqlx::Error> {
    // Short public identifier, fixed at creation time.
    let share_token = Uuid::new_v4().to_string()[..8].to_string();

    let result = sqlx::query(
        r#"
        insert into songs
            (share_token, title, artist, chord_content, source_url, personal_notes)
        values
            (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&share_token)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.chord_content)
    .bind(&song.source_url)
    .bind(song.personal_notes.clone().unwrap_or_default())
    .execute(pool)
    .await?;

    Ok(CreatedSong {
        id: result.last_insert_rowid(),
        share_token,
    })
}

pub async fn get_all_songs(pool: &SqlitePool) -> Result<Vec<SongRow>, sqlx::Error> {
    sqlx::query_as::<_, SongRow>(
        r#"
        select
            id, share_token, title, artist, chord_content,
            source_url, personal_notes, created_at, updated_at
        from
            songs
        order by updated_at desc
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_song_by_id(id: i64, pool: &SqlitePool) -> Result<Option<SongRow>, sqlx::Error> {
    sqlx::query_as::<_, SongRow>(
        r#"
        select
            id, share_token, title, artist, chord_content,
            source_url, personal_notes, created_at, updated_at
        from
            songs
        where id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_song_by_share_token(
    share_token: &str,
    pool: &SqlitePool,
) -> Result<Option<SongRow>, sqlx::Error> {
    sqlx::query_as::<_, SongRow>(
        r#"
        select
            id, share_token, title, artist, chord_content,
            source_url, personal_notes, created_at, updated_at
        from
            songs
        where share_token = ?
        "#,
    )
    .bind(share_token)
    .fetch_optional(pool)
    .await
}

pub async fn update_song(
    id: i64,
    song: &SongPayload,
    pool: &SqlitePool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        update songs
        set
            title = ?, artist = ?, chord_content = ?, source_url = ?,
            personal_notes = ?, updated_at = CURRENT_TIMESTAMP
        where id = ?
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.chord_content)
    .bind(&song.source_url)
    .bind(song.personal_notes.clone().unwrap_or_default())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_song(id: i64, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("delete from songs where id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn search_songs(query: &str, pool: &SqlitePool) -> Result<Vec<SongRow>, sqlx::Error> {
    let pattern = format!("%{}%", query);

    sqlx::query_as::<_, SongRow>(
        r#"
        select
            id, share_token, title, artist, chord_content,
            source_url, personal_notes, created_at, updated_at
        from
            songs
        where title like ? or artist like ? or chord_content like ?
        order by updated_at desc
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await
}
