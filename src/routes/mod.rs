pub mod chord_route;
pub mod default_route;
pub mod share_route;
pub mod song_route;
