// src/extractors/normalize.rs
use crate::extractors::segment::RawBlock;
use crate::extractors::line::ClassifiedLine;
use crate::utils::error::ExtractError;

/// A code block ready for output: directive and option lines removed,
/// common indentation stripped, no leading or trailing blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBlock {
    pub number: usize,     // 1-based
    pub start_line: usize, // 1-based line of the directive
    pub language: Option<String>,
    pub directive: String,    // directive line, trimmed
    pub options: Vec<String>, // option lines in source order, trimmed
    pub lines: Vec<String>,
}

impl NormalizedBlock {
    /// Block content joined with newlines, ending with a newline when non-empty.
    pub fn code(&self) -> String {
        let mut code = self.lines.join("\n");
        if !code.is_empty() {
            code.push('\n');
        }
        code
    }
}

/// Turns a raw block into its normalized form. `number` is the block's 1-based label.
pub fn normalize(raw: &RawBlock<'_>, number: usize) -> Result<NormalizedBlock, ExtractError> {
    let (options, content): (Vec<&ClassifiedLine<'_>>, Vec<&ClassifiedLine<'_>>) = raw.body().iter().partition(|line| line.is_option());

    if content.is_empty() {
        return Err(ExtractError::Extraction {
            block: number,
            line: raw.start + 1,
            reason: "code block directive has no content".to_string(),
        });
    }

    let min_indent = content
        .iter()
        .filter(|line| !line.blank)
        .map(|line| line.indent)
        .min()
        .unwrap_or(0);

    let mut lines: Vec<String> = content
        .iter()
        .map(|line| {
            if line.blank {
                String::new()
            } else {
                strip_chars(line.text, min_indent).trim_end().to_string()
            }
        })
        .collect();

    // Trim blank lines from both ends.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);

    tracing::trace!(
        "Normalized block {} (line {}): {} lines, stripped indent {}",
        number,
        raw.start + 1,
        lines.len(),
        min_indent
    );

    Ok(NormalizedBlock {
        number,
        start_line: raw.start + 1,
        language: raw.language.map(str::to_string),
        directive: raw.lines.first().map(|l| l.text.trim().to_string()).unwrap_or_default(),
        options: options.iter().map(|l| l.text.trim().to_string()).collect(),
        lines,
    })
}

// Drops the first `count` characters (not bytes) of `text`.
fn strip_chars(text: &str, count: usize) -> &str {
    let offset = text.char_indices().nth(count).map_or(text.len(), |(i, _)| i);
    &text[offset..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::line::LineClassifier;
    use crate::extractors::segment::segment;

    fn normalize_text(text: &str) -> Result<Vec<NormalizedBlock>, ExtractError> {
        let classifier =
            LineClassifier::new(&["code-block".to_string()], &["python".to_string()]).unwrap();
        let lines = classifier.classify_all(text);
        segment(&lines)
            .iter()
            .enumerate()
            .map(|(i, raw)| normalize(raw, i + 1))
            .collect()
    }

    #[test]
    fn test_strips_common_indent_and_keeps_relative() {
        let blocks = normalize_text(
            ".. code-block:: python\n\n    def f():\n        return 1\n\n    f()\n",
        )
        .unwrap();
        assert_eq!(blocks[0].lines, vec!["def f():", "    return 1", "", "f()"]);
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[0].language.as_deref(), Some("python"));
    }

    #[test]
    fn test_option_lines_are_dropped_and_recorded() {
        let blocks = normalize_text(
            ".. code-block:: python\n    :linenos:\n    :caption: Demo\n\n    print(1)\n",
        )
        .unwrap();
        assert_eq!(blocks[0].lines, vec!["print(1)"]);
        assert_eq!(blocks[0].options, vec![":linenos:", ":caption: Demo"]);
        assert_eq!(blocks[0].directive, ".. code-block:: python");
    }

    #[test]
    fn test_block_without_options_records_none() {
        let blocks = normalize_text("  .. code-block:: python\n\n      x = 1\n").unwrap();
        assert!(blocks[0].options.is_empty());
        assert_eq!(blocks[0].directive, ".. code-block:: python");
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let blocks = normalize_text(".. code-block:: python\n    x = 1   \n    if x:\t\n        y = 2 \n").unwrap();
        assert_eq!(blocks[0].lines, vec!["x = 1", "if x:", "    y = 2"]);
        assert_eq!(blocks[0].code(), "x = 1\nif x:\n    y = 2\n");
    }

    #[test]
    fn test_option_with_shallower_indent_does_not_affect_indent() {
        let blocks = normalize_text(".. code-block:: python\n  :linenos:\n\n      x = 1\n      y = 2\n").unwrap();
        // The option line sets the segment indent at 2 but is gone before stripping.
        assert_eq!(blocks[0].lines, vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn test_whitespace_only_lines_become_empty() {
        let blocks = normalize_text(".. code-block:: python\n    a = 1\n        \n    b = 2\n").unwrap();
        assert_eq!(blocks[0].lines, vec!["a = 1", "", "b = 2"]);
        assert_eq!(blocks[0].code(), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn test_blank_only_body_is_error() {
        let err = normalize_text("Text\n\n.. code-block:: python\n\n\n").unwrap_err();
        match err {
            ExtractError::Extraction { block, line, .. } => {
                assert_eq!(block, 1);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_options_only_body_is_error() {
        let err = normalize_text(".. code-block:: python\n    :linenos:\n").unwrap_err();
        assert!(matches!(err, ExtractError::Extraction { block: 1, .. }));
    }

    #[test]
    fn test_second_block_error_reports_its_number() {
        let err = normalize_text(".. code-block:: python\n    x = 1\n.. code-block:: python\n").unwrap_err();
        assert!(matches!(err, ExtractError::Extraction { block: 2, line: 3, .. }));
    }

    #[test]
    fn test_blank_between_option_and_code_is_trimmed() {
        let raw = ".. code-block:: python\n\n    :linenos:\n\n    x = 1\n\n";
        let blocks = normalize_text(raw).unwrap();
        assert_eq!(blocks[0].lines, vec!["x = 1"]);
        let indent = blocks[0]
            .lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min();
        assert_eq!(indent, Some(0));
    }

    #[test]
    fn test_multibyte_indent_is_counted_in_chars() {
        assert_eq!(strip_chars("\u{3000}\u{3000}x", 2), "x");
        assert_eq!(strip_chars("ab", 5), "");
    }
}
