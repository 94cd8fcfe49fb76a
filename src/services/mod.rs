pub mod amdm_scraper;
pub mod discovery;
pub mod ug_scraper;

pub use amdm_scraper::*;
pub use discovery::*;
pub use ug_scraper::*;
