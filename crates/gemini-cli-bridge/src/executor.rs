//! Child-process invocation of the Gemini command-line tool.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::types::{GeminiError, GeminiResult};

/// Program looked up on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "gemini";

/// Flag that introduces the prompt argument.
pub const DEFAULT_PROMPT_FLAG: &str = "-p";

/// Runs the external tool once per prompt.
///
/// The prompt is always passed as its own argument, never through a shell,
/// so quotes, backticks and `$` reach the tool unchanged.
#[derive(Debug, Clone)]
pub struct GeminiExecutor {
    program: PathBuf,
    args: Vec<OsString>,
    prompt_flag: String,
}

impl Default for GeminiExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl GeminiExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            prompt_flag: DEFAULT_PROMPT_FLAG.to_string(),
        }
    }

    /// Arguments placed before the prompt flag.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prompt_flag(mut self, flag: impl Into<String>) -> Self {
        self.prompt_flag = flag.into();
        self
    }

    fn command(&self, prompt: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&self.prompt_flag)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run the tool with `prompt` and wait for it to exit.
    ///
    /// Resolves to the trimmed stdout on exit status zero. Any other exit,
    /// including termination by a signal, yields [`GeminiError::Failed`]
    /// carrying the trimmed stderr. There is no timeout.
    pub async fn run(&self, prompt: &str) -> GeminiResult<String> {
        tracing::debug!(
            "Spawning {} ({} byte prompt)",
            self.program.display(),
            prompt.len()
        );

        let child = self
            .command(prompt)
            .spawn()
            .map_err(|source| GeminiError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let output = child.wait_with_output().await?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Ok(stdout.trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!("{} exited with {}", self.program.display(), output.status);
        Err(GeminiError::failed(output.status.code(), &stderr))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::types::GENERIC_FAILURE;

    /// Stand-in for the real tool: `$1` is the prompt flag, `$2` the prompt.
    fn sh(script: &str) -> GeminiExecutor {
        GeminiExecutor::new("/bin/sh").with_args(["-c", script, "gemini"])
    }

    #[tokio::test]
    async fn test_stdout_is_trimmed() {
        let out = sh("printf '  hello\\n\\n'").run("hi").await.unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_prompt_flag_precedes_prompt() {
        let out = sh("printf '%s|%s' \"$1\" \"$2\"").run("hi").await.unwrap();
        assert_eq!(out, "-p|hi");

        let out = sh("printf '%s|%s' \"$1\" \"$2\"")
            .with_prompt_flag("--prompt")
            .run("hi")
            .await
            .unwrap();
        assert_eq!(out, "--prompt|hi");
    }

    #[tokio::test]
    async fn test_shell_metacharacters_reach_tool_verbatim() {
        let prompt = r#"say "hi" `id` $(whoami) $HOME; echo 'x' | cat && \n"#;
        let out = sh("printf '%s' \"$2\"").run(prompt).await.unwrap();
        assert_eq!(out, prompt);
    }

    #[tokio::test]
    async fn test_empty_output_is_success() {
        let out = sh("exit 0").run("hi").await.unwrap();
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let err = sh("echo partial; echo boom >&2; exit 1")
            .run("hi")
            .await
            .unwrap_err();
        match err {
            GeminiError::Failed { exit_code, message } => {
                assert_eq!(exit_code, Some(1));
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr() {
        let err = sh("exit 3").run("hi").await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_killed_by_signal() {
        let err = sh("kill -9 $$").run("hi").await.unwrap_err();
        assert!(matches!(
            err,
            GeminiError::Failed {
                exit_code: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = GeminiExecutor::new("/nonexistent/gemini-cli-bridge-test")
            .run("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Spawn { .. }), "got {err}");
        assert!(err.to_string().contains("/nonexistent/gemini-cli-bridge-test"));
    }

    #[tokio::test]
    async fn test_directory_is_not_spawnable() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeminiExecutor::new(dir.path())
            .run("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Spawn { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_repeated_runs_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let counter = dir.path().join("count");
        let script = format!("echo x >> '{c}'; wc -l < '{c}'", c = counter.display());
        let exec = sh(&script);

        assert_eq!(exec.run("same").await.unwrap(), "1");
        assert_eq!(exec.run("same").await.unwrap(), "2");
    }
}
