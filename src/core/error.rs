//! Error types for the garden core

use thiserror::Error;

/// Main error type for the garden
#[derive(Debug, Error)]
pub enum Error {
    /// A species name or index outside the closed flower set.
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Unknown garden style: {0}")]
    UnknownStyle(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid flower id: {0}")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A mood request is already in flight")]
    MoodInFlight,

    #[error("Mood text is empty")]
    EmptyMood,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
