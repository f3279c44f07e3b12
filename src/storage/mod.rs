// src/storage/mod.rs
use crate::extractors::ExtractedDocument;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
    extension: String,
}

impl StorageManager {
    /// Creates a new StorageManager writing `<stem>.<extension>` files into `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P, extension: &str) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path, extension: extension.trim_start_matches('.').to_string() })
    }

    /// Saves the assembled output of a document next to the others in the base directory
    pub fn save_output(&self, document: &ExtractedDocument, text: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.{}", stem(document), self.extension));
        write_output(&file_path, text)?;
        Ok(file_path)
    }

    /// Saves metadata about the document's blocks in JSON format
    pub fn save_metadata(&self, document: &ExtractedDocument) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem(document)));

        let blocks: Vec<_> = document
            .blocks
            .iter()
            .map(|block| {
                serde_json::json!({
                    "number": block.number,
                    "start_line": block.start_line,
                    "language": block.language,
                    "directive": block.directive,
                    "options": block.options,
                    "line_count": block.lines.len(),
                })
            })
            .collect();

        let metadata = serde_json::json!({
            "source": document.source_name,
            "block_count": document.blocks.len(),
            "blocks": blocks,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// Writes extracted text to an explicit output path
pub fn write_output(path: &Path, text: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(StorageError::IoError)?;
    }
    fs::write(path, text).map_err(StorageError::IoError)?;

    tracing::info!("Saved output to {}", path.display());
    Ok(())
}

// File stem of the source document, e.g. `guide` for `docs/guide.rst`.
fn stem(document: &ExtractedDocument) -> String {
    Path::new(&document.source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extracted".to_string())
}
