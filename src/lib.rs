// src/lib.rs
//! Extracts `code-block` directives of one language from reStructuredText documents.
pub mod extractors;
pub mod runner;
pub mod storage;
pub mod utils;

pub use extractors::{extract, ExtractOptions, ExtractedDocument, Extractor};
pub use utils::error::{AppError, ExtractError};
