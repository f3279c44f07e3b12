// src/runner/executor.rs
use crate::utils::config::RunnerSettings;
use crate::utils::error::RunError;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Captured result of one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>, // None when the child was killed by a signal
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs code by piping it into an interpreter's stdin.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    binary: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ScriptRunner {
    pub fn new(binary: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self { binary: binary.into(), args, timeout }
    }

    /// Runner that executes code with the configured interpreter.
    pub fn from_settings(settings: &RunnerSettings) -> Self {
        Self::new(settings.binary.clone(), settings.args.clone(), settings.timeout())
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Runs `code` and waits for the child, killing it once the timeout expires.
    pub async fn run(&self, code: &str) -> Result<RunOutput, RunError> {
        tracing::info!("Running {} lines with {}", code.lines().count(), self.binary);
        tracing::debug!("Runner args: {:?}, timeout: {:?}", self.args, self.timeout);

        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn { binary: self.binary.clone(), source })?;

        // Feed stdin from a separate task so a chatty child can't deadlock on a full pipe.
        let mut stdin = child.stdin.take().ok_or_else(|| {
            RunError::Io(std::io::Error::new(std::io::ErrorKind::Other, "child stdin was not captured"))
        })?;
        let input = code.to_owned();
        let writer = tokio::spawn(async move {
            stdin.write_all(input.as_bytes()).await?;
            stdin.shutdown().await
        });

        // Dropping the wait future on timeout drops the child, and kill_on_drop reaps it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                tracing::warn!("{} did not finish within {:?}, killed", self.binary, self.timeout);
                return Err(RunError::Timeout(self.timeout));
            }
        };

        match writer.await {
            Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(RunError::Io(e)),
            Err(join) => {
                return Err(RunError::Io(std::io::Error::new(std::io::ErrorKind::Other, join.to_string())))
            }
            _ => {} // A child that exits without reading all input is not an error.
        }

        let result = RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        tracing::debug!(
            "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
            self.binary,
            result.exit_code,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(timeout: Duration) -> ScriptRunner {
        ScriptRunner::new("sh", Vec::new(), timeout)
    }

    #[tokio::test]
    async fn test_captures_stdout_stderr_and_exit_code() {
        let output = sh(Duration::from_secs(10))
            .run("echo hello\necho oops 1>&2\nexit 3\n")
            .await
            .unwrap();
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_comment_labels_are_harmless() {
        let output = sh(Duration::from_secs(10))
            .run("# Block 1:\necho one\n\n# Block 2:\necho two\n")
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let err = sh(Duration::from_millis(200)).run("sleep 5\n").await.unwrap_err();
        assert!(matches!(err, RunError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let runner = ScriptRunner::new("/nonexistent_dir/interpreter", Vec::new(), Duration::from_secs(1));
        let err = runner.run("print(1)").await.unwrap_err();
        match err {
            RunError::Spawn { binary, .. } => assert_eq!(binary, "/nonexistent_dir/interpreter"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_settings() {
        let settings = RunnerSettings::default();
        let runner = ScriptRunner::from_settings(&settings);
        assert_eq!(runner.binary(), "python3");
        assert_eq!(runner.args, vec!["-"]);
        assert_eq!(runner.timeout, Duration::from_secs(30));
    }
}
