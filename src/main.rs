use std::net::TcpListener;

use capo::{configuration::get_configuration, dal::song_db, startup::run};
use env_logger::Env;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    if let Some(parent) = std::path::Path::new(&configuration.database.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let connection_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&configuration.database.connection_string())
        .await
        .expect("Failed to connect to sqlite.");

    song_db::init_database(&connection_pool)
        .await
        .expect("Failed to initialize database.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    log::info!(
        "Chord finder listening on port {}",
        configuration.application.port
    );

    run(listener, connection_pool)?.await
}
