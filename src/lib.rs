pub mod app;
pub mod config;
pub mod lookup;
pub mod render;
pub mod ui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
