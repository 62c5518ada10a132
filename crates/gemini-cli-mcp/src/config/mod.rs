//! Configuration loading and resolution.

use std::path::PathBuf;

use gemini_cli_bridge::{GeminiExecutor, DEFAULT_PROGRAM};

/// Environment variable naming the Gemini CLI executable.
pub const PROGRAM_ENV: &str = "GEMINI_CLI_PATH";

/// Environment variable bounding concurrent tool executions.
pub const MAX_CONCURRENT_ENV: &str = "GEMINI_MCP_MAX_CONCURRENT";

pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub program: PathBuf,
    pub max_concurrent_calls: usize,
}

impl ServerConfig {
    /// Explicit values win over the environment, which wins over defaults.
    pub fn resolve(program: Option<&str>, max_concurrent_calls: Option<usize>) -> Self {
        Self {
            program: resolve_program(program),
            max_concurrent_calls: resolve_max_concurrent(max_concurrent_calls),
        }
    }

    pub fn executor(&self) -> GeminiExecutor {
        GeminiExecutor::new(self.program.clone())
    }
}

/// Resolve the Gemini CLI executable.
pub fn resolve_program(explicit: Option<&str>) -> PathBuf {
    resolve_program_from(explicit, std::env::var(PROGRAM_ENV).ok())
}

fn resolve_program_from(explicit: Option<&str>, env: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    match env {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_PROGRAM),
    }
}

/// Resolve the admission limit; `0` means unbounded.
pub fn resolve_max_concurrent(explicit: Option<usize>) -> usize {
    resolve_max_concurrent_from(explicit, std::env::var(MAX_CONCURRENT_ENV).ok())
}

fn resolve_max_concurrent_from(explicit: Option<usize>, env: Option<String>) -> usize {
    if let Some(n) = explicit {
        return n;
    }

    let Some(raw) = env else {
        return DEFAULT_MAX_CONCURRENT;
    };

    match raw.trim().parse() {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!("Ignoring {MAX_CONCURRENT_ENV}={raw:?}: {e}");
            DEFAULT_MAX_CONCURRENT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_precedence() {
        assert_eq!(
            resolve_program_from(Some("/opt/gemini"), Some("/env/gemini".into())),
            PathBuf::from("/opt/gemini")
        );
        assert_eq!(
            resolve_program_from(None, Some("/env/gemini".into())),
            PathBuf::from("/env/gemini")
        );
        assert_eq!(resolve_program_from(None, Some("  ".into())), PathBuf::from("gemini"));
        assert_eq!(resolve_program_from(None, None), PathBuf::from("gemini"));
    }

    #[test]
    fn test_max_concurrent_precedence() {
        assert_eq!(resolve_max_concurrent_from(Some(0), Some("9".into())), 0);
        assert_eq!(resolve_max_concurrent_from(None, Some(" 9 ".into())), 9);
        assert_eq!(
            resolve_max_concurrent_from(None, Some("lots".into())),
            DEFAULT_MAX_CONCURRENT
        );
        assert_eq!(resolve_max_concurrent_from(None, None), DEFAULT_MAX_CONCURRENT);
    }
}
