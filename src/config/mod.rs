//! Configuration management module
//!
//! Responsible for loading application configuration from environment variables and `.env` files

pub mod settings;

pub use settings::Settings;
