/// Database configuration and connection management
pub mod database;

/// Optional settings loaded from trade-desk.toml
pub mod settings;
