//! Error types for the macro_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for macro_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a calorie figure nor a TDEE was supplied
    #[error("must specify either daily calories or total daily energy expenditure")]
    MissingCalorieTarget,

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),
}
