// src/utils/config.rs
use crate::extractors::ExtractOptions;
use crate::utils::error::AppError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// Parses stdin with Python's own parser; exit status 0 means the code is syntactically valid.
const PYTHON_SYNTAX_CHECK: &str = "import ast, sys; ast.parse(sys.stdin.read())";

/// Settings loaded from an optional TOML file. Every field has a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extract: ExtractSettings,
    pub runner: RunnerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Directive names that open a code block, e.g. `code-block`.
    pub directives: Vec<String>,
    /// Language tags treated as the target language.
    pub languages: Vec<String>,
    /// Text placed before `Block <n>:` in printed output.
    pub label_prefix: String,
    /// Extension used when writing into `--output-dir`.
    pub output_extension: String,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        let options = ExtractOptions::default();
        Self {
            directives: options.directives,
            languages: options.languages,
            label_prefix: options.label_prefix,
            output_extension: "py".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    pub binary: String,
    /// Arguments passed when executing code piped on stdin.
    pub args: Vec<String>,
    /// Arguments passed when only checking syntax.
    pub check_args: Vec<String>,
    pub timeout_secs: u64,
    /// Labels in executed code are rendered with this prefix so they stay comments.
    pub label_prefix: String,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            binary: "python3".to_string(),
            args: vec!["-".to_string()],
            check_args: vec!["-c".to_string(), PYTHON_SYNTAX_CHECK.to_string()],
            timeout_secs: 30,
            label_prefix: "# ".to_string(),
        }
    }
}

impl RunnerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            tracing::debug!("No settings file given, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read settings file '{}': {}", path.display(), e))
        })?;
        let settings = Self::from_toml(&raw)
            .map_err(|e| AppError::Config(format!("Invalid settings file '{}': {}", path.display(), e)))?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Extraction options for the core, built from the `[extract]` table.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            directives: self.extract.directives.clone(),
            languages: self.extract.languages.clone(),
            label_prefix: self.extract.label_prefix.clone(),
        }
    }
}
