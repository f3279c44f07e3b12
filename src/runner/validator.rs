// src/runner/validator.rs
use crate::runner::executor::ScriptRunner;
use crate::utils::config::RunnerSettings;
use crate::utils::error::RunError;

/// Judges whether extracted code is syntactically valid by handing it to a
/// checker program. Exit status 0 means valid; the code is never executed.
#[derive(Debug, Clone)]
pub struct SyntaxValidator {
    checker: ScriptRunner,
}

impl SyntaxValidator {
    pub fn new(checker: ScriptRunner) -> Self {
        Self { checker }
    }

    /// Validator using the configured interpreter with its `check_args`.
    pub fn from_settings(settings: &RunnerSettings) -> Self {
        Self::new(ScriptRunner::new(
            settings.binary.clone(),
            settings.check_args.clone(),
            settings.timeout(),
        ))
    }

    pub async fn is_valid(&self, code: &str) -> Result<bool, RunError> {
        if code.trim().is_empty() {
            return Ok(true);
        }

        let output = self.checker.run(code).await?;
        if !output.success() {
            tracing::debug!("Syntax check failed: {}", output.stderr.trim());
        }
        Ok(output.success())
    }
}
