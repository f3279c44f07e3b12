// src/extractors/document.rs
use crate::extractors::assemble::assemble;
use crate::extractors::line::LineClassifier;
use crate::extractors::normalize::{normalize, NormalizedBlock};
use crate::extractors::segment::segment;
use crate::utils::error::ExtractError;
use std::path::Path;

/// What to extract and how to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub directives: Vec<String>,
    pub languages: Vec<String>,
    pub label_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            directives: vec!["code-block".to_string()],
            languages: vec!["python".to_string(), "python3".to_string(), "py".to_string()],
            label_prefix: String::new(),
        }
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub source_name: String,
    pub blocks: Vec<NormalizedBlock>,
}

impl ExtractedDocument {
    /// Assembles the blocks with the given label prefix.
    pub fn render(&self, label_prefix: &str) -> String {
        assemble(&self.blocks, label_prefix)
    }
}

pub struct Extractor {
    classifier: LineClassifier,
    label_prefix: String,
}

impl Extractor {
    pub fn new(options: &ExtractOptions) -> Result<Self, ExtractError> {
        Ok(Self {
            classifier: LineClassifier::new(&options.directives, &options.languages)?,
            label_prefix: options.label_prefix.clone(),
        })
    }

    pub fn label_prefix(&self) -> &str {
        &self.label_prefix
    }

    /// Extracts the code blocks of the file at `path` into the assembled output text.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<String, ExtractError> {
        let document = self.extract_document(path)?;
        Ok(document.render(&self.label_prefix))
    }

    /// Loads the file at `path` and extracts its blocks.
    pub fn extract_document<P: AsRef<Path>>(&self, path: P) -> Result<ExtractedDocument, ExtractError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        tracing::debug!("Reading {}", source_name);
        let text = std::fs::read_to_string(path).map_err(|source| ExtractError::FileAccess {
            path: source_name.clone(),
            source,
        })?;

        self.extract_text(&source_name, &text)
    }

    /// Extracts the blocks of an in-memory document. `source_name` is used in errors and logs.
    pub fn extract_text(&self, source_name: &str, text: &str) -> Result<ExtractedDocument, ExtractError> {
        if text.is_empty() {
            return Err(ExtractError::EmptyDocument { source_name: source_name.to_string() });
        }

        let lines = self.classifier.classify_all(text);
        let raw_blocks = segment(&lines);

        let blocks = raw_blocks
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            "Extracted {} code blocks from {} ({} lines)",
            blocks.len(),
            source_name,
            lines.len()
        );

        Ok(ExtractedDocument { source_name: source_name.to_string(), blocks })
    }
}

/// Extracts Python code blocks from the file at `path` with the default options.
pub fn extract<P: AsRef<Path>>(path: P) -> Result<String, ExtractError> {
    Extractor::new(&ExtractOptions::default())?.extract(path)
}
