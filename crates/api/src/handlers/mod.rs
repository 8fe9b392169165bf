pub mod feed;
pub mod health;

pub use health::health_check;
