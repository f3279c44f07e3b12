// src/extractors/line.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Field/option line such as `:linenos:`, `:caption: Example` or `:caption:Example`.
static OPTION_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*:[A-Za-z][\w.+-]*:\s*.*$").expect("Failed to compile OPTION_LINE_RE")
});

/// Classification of a single source line. Computed once per line up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A code-block directive. `selected` is true when its tag is the target language
    /// or when it carries no tag at all.
    Directive { language: Option<&'a str>, selected: bool },
    Option,
    Ordinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub index: usize, // 0-based position in the source
    pub text: &'a str,
    pub indent: usize, // count of leading whitespace characters
    pub blank: bool,
    pub kind: LineKind<'a>,
}

impl ClassifiedLine<'_> {
    /// True for a directive that opens a block we extract.
    pub fn opens_block(&self) -> bool {
        matches!(self.kind, LineKind::Directive { selected: true, .. })
    }

    pub fn is_option(&self) -> bool {
        self.kind == LineKind::Option
    }
}

pub struct LineClassifier {
    directive_re: Regex,
    languages: Vec<String>, // lowercased
}

impl LineClassifier {
    pub fn new(directives: &[String], languages: &[String]) -> Result<Self, ExtractError> {
        if directives.is_empty() {
            return Err(ExtractError::InvalidPattern("no directive names configured".to_string()));
        }

        let names = directives
            .iter()
            .map(|name| regex::escape(name.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"^\s*\.\.\s+(?:{})::\s*(\S+)?\s*$", names);
        let directive_re = Regex::new(&pattern)
            .map_err(|e| ExtractError::InvalidPattern(format!("'{}': {}", pattern, e)))?;

        Ok(Self {
            directive_re,
            languages: languages.iter().map(|l| l.trim().to_lowercase()).collect(),
        })
    }

    /// Classifies one line. `index` is only carried along for error reporting.
    pub fn classify<'a>(&self, index: usize, line: &'a str) -> ClassifiedLine<'a> {
        let blank = line.trim().is_empty();
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();

        let kind = if blank {
            LineKind::Ordinary
        } else if let Some(caps) = self.directive_re.captures(line) {
            let language = caps.get(1).map(|m| m.as_str());
            LineKind::Directive { language, selected: self.accepts(language) }
        } else if OPTION_LINE_RE.is_match(line) {
            LineKind::Option
        } else {
            LineKind::Ordinary
        };

        ClassifiedLine { index, text: line, indent, blank, kind }
    }

    /// Splits `text` into lines (handling `\r\n`) and classifies every one of them.
    pub fn classify_all<'a>(&self, text: &'a str) -> Vec<ClassifiedLine<'a>> {
        text.lines().enumerate().map(|(i, line)| self.classify(i, line)).collect()
    }

    /// True iff `line` opens a block of the target language (or an untagged block).
    pub fn is_directive_open(&self, line: &str) -> bool {
        self.classify(0, line).opens_block()
    }

    fn accepts(&self, language: Option<&str>) -> bool {
        match language {
            None => true,
            Some(tag) => {
                let tag = tag.to_lowercase();
                self.languages.iter().any(|l| *l == tag)
            }
        }
    }
}

/// True iff `line` is a reStructuredText field/option line.
pub fn is_option(line: &str) -> bool {
    OPTION_LINE_RE.is_match(line)
}
