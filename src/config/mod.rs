/// Database configuration and connection management
pub mod database;

/// Group seed configuration loading from config.toml
pub mod group;

/// Runtime settings from environment variables
pub mod settings;
