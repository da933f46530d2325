//! Executes captured `curl` commands through the system shell.
//!
//! The command runs under `sh -c` so the quoting and line continuations that
//! were pasted in behave exactly as they would in a terminal. `-s` silences the
//! progress meter and `-w` appends the status code on its own line.

use std::process::Command;

const WRITE_OUT_SUFFIX: &str = r" -s -w '\n%{http_code}'";

#[derive(Debug, thiserror::Error)]
pub(crate) enum RunnerError {
    #[error("failed to start shell: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("curl command failed with error: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

/// The shell line actually executed: `command` with the write-out flags appended.
///
/// A trailing line continuation would escape the space before `-s`, so it is dropped.
fn shell_line(command: &str) -> String {
    let base = command.trim().trim_end_matches('\\').trim_end();
    format!("{base}{WRITE_OUT_SUFFIX}")
}

/// Run `command` and return its stdout (body followed by the status line).
pub(crate) fn run_curl(command: &str) -> Result<String, RunnerError> {
    let full = shell_line(command);
    tracing::debug!(command = %full, "executing curl");

    let output = Command::new("sh").arg("-c").arg(&full).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(RunnerError::Failed {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_successful_command_returns_stdout() {
        // `true` ignores the appended curl flags
        assert_eq!(run_curl("true").unwrap(), "");
    }

    #[test]
    fn test_trailing_continuation_is_dropped() {
        assert_eq!(
            shell_line("curl https://shop.test/api/v1/products \\\n  "),
            r"curl https://shop.test/api/v1/products -s -w '\n%{http_code}'"
        );
        assert_eq!(
            shell_line("  curl https://shop.test  "),
            r"curl https://shop.test -s -w '\n%{http_code}'"
        );
    }

    #[test]
    fn test_failing_command_reports_exit_code() {
        match run_curl("false") {
            Err(RunnerError::Failed { code, .. }) => assert_eq!(code, Some(1)),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
