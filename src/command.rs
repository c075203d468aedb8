use std::path::Path;
use std::process::Command;

/// Outcome of one external command: exit status plus both captured streams.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Run `command_line` through the host shell from `cwd`, blocking until the
/// child exits. No timeout — a hung tool hangs the whole run.
///
/// Spawn errors (shell missing, cwd deleted) are folded into a failed
/// `CommandResult` with the error text in `stderr`; callers never see an Err.
pub fn run_shell(command_line: &str, cwd: &Path) -> CommandResult {
    match shell_command(command_line).current_dir(cwd).output() {
        Ok(out) => CommandResult {
            succeeded: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        },
        Err(err) => CommandResult::failure(err.to_string()),
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn captures_stdout_on_success() {
        let result = run_shell("echo hello", Path::new("."));
        assert!(result.succeeded);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_is_a_failed_result() {
        let result = run_shell("exit 3", Path::new("."));
        assert!(!result.succeeded);
    }

    #[test]
    fn unknown_command_fails_without_panicking() {
        let result = run_shell("definitely-not-a-real-binary-xyz", Path::new("."));
        assert!(!result.succeeded);
    }

    #[test]
    fn missing_cwd_becomes_failed_result() {
        let result = run_shell("echo hi", Path::new("/nonexistent/dir/for/test"));
        assert!(!result.succeeded);
        assert!(!result.stderr.is_empty());
    }
}
