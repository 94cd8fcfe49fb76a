pub mod song_db;
