// src/system/executor.rs

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' exited with a non-zero status ({status}).")]
    NonZeroExitStatus { command: String, status: String },
}

/// Runs a command line to completion in `cwd`, inheriting stdout and stderr.
///
/// Blocks until the process exits. An empty command line is a no-op.
pub fn execute_command(command_line: &str, cwd: &Path) -> Result<(), ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Ok(());
    }

    let parts = shlex::split(trimmed_command)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed_command.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Ok(());
    };

    let clean_cwd = dunce::simplified(cwd);
    log::debug!("Running '{}' in '{}'", trimmed_command, clean_cwd.display());

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .current_dir(clean_cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // `npm` and friends are `.cmd` shims on Windows, which `CreateProcess`
    // cannot start directly. Retry through `cmd /C` when the program is missing.
    let status = match command.status() {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
            log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
            StdCommand::new("cmd")
                .arg("/C")
                .arg(trimmed_command)
                .current_dir(clean_cwd)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?
        }
        Err(e) => {
            return Err(ExecutionError::CommandFailed(
                trimmed_command.to_string(),
                e,
            ));
        }
    };

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus {
            command: trimmed_command.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_command_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        assert!(execute_command("   ", dir.path()).is_ok());
    }

    #[test]
    fn test_unbalanced_quotes_fail_to_parse() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            execute_command("npm install \"unterminated", dir.path()),
            Err(ExecutionError::CommandParse(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_checked() {
        let dir = TempDir::new().unwrap();
        assert!(execute_command("true", dir.path()).is_ok());
        assert!(matches!(
            execute_command("false", dir.path()),
            Err(ExecutionError::NonZeroExitStatus { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        execute_command("touch marker.txt", dir.path()).unwrap();
        assert!(dir.path().join("marker.txt").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_program_is_reported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            execute_command("cepgen-no-such-program-xyz install", dir.path()),
            Err(ExecutionError::CommandFailed(..))
        ));
    }
}
