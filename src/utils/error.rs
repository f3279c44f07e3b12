// src/utils/error.rs
use std::time::Duration;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Cannot read file '{path}': {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error, // Original I/O message is kept in the chain and the display
    },

    #[error("Empty file encountered: {source_name}")]
    EmptyDocument { source_name: String },

    #[error("Malformed code block {block} (line {line}): {reason}")]
    Extraction {
        block: usize, // 1-based number among the extracted blocks
        line: usize,  // 1-based line of the directive in the source
        reason: String,
    },

    #[error("Invalid directive pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to start '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to child process: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Runner failed: {0}")]
    Run(#[from] RunError),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
