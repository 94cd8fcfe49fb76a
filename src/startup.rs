use std::net::TcpListener;

use actix_files::Files;
use actix_web::{
    dev::Server,
    middleware::Logger,
    web,
    App, HttpServer,
};
use sqlx::SqlitePool;

use crate::routes::{chord_route, default_route, share_route, song_route};

pub fn run(listener: TcpListener, db_pool: SqlitePool) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(default_route::index)
            .service(share_route::share_song)
            .service(
                web::scope("/api")
                    .service(chord_route::search_chords)
                    .service(chord_route::extract_chords)
                    .service(song_route::get_songs)
                    .service(song_route::get_song)
                    .service(song_route::save_song)
                    .service(song_route::update_song)
                    .service(song_route::delete_song)
                    .service(song_route::search_songs),
            )
            .app_data(db_pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
