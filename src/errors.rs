// src/errors.rs
use thiserror::Error;

use crate::form::test_cases::RowId;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Raised before any request is sent.
    #[error("Please provide code to evaluate")]
    EmptyCode,

    #[error("Error uploading file: {0}")]
    Upload(String),

    #[error("Error: {0}")]
    Evaluation(String),

    #[error("Test case row {0} does not exist")]
    UnknownRow(RowId),

    #[error("Unsupported language '{0}'")]
    UnknownLanguage(String),

    #[error("Unknown input mode '{0}'")]
    UnknownInputMode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
