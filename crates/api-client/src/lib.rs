pub mod client;
pub mod config;

pub use client::ApiClient;
pub use config::{ClientConfig, ServerSettings, CONFIG_FILE_NAME};
pub use picfolio_api;
