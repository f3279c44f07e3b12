// src/extractors/mod.rs
pub mod assemble;
pub mod document;
pub mod line;
pub mod normalize;
pub mod segment;

// Re-export key extraction types for convenience
pub use assemble::assemble;
pub use document::{extract, ExtractOptions, ExtractedDocument, Extractor};
pub use line::{is_option, ClassifiedLine, LineClassifier, LineKind};
pub use normalize::{normalize, NormalizedBlock};
pub use segment::{segment, RawBlock};
