pub mod config;

pub use config::{ClientConfig, ConfigError, CONFIG};
