pub mod janitor;
pub mod web;

pub use janitor::spawn_cache_janitor;
pub use web::start_web_server;
