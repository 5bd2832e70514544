use crate::{ControlApiError, Result};

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

// Keep tool chatter out of error messages
const MAX_OUTPUT_LINES: usize = 10;
const MAX_OUTPUT_LEN: usize = 1_000;

pub(crate) struct CommandOutput {
    pub command: String,
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Turn a non-zero exit into `CommandFailed`
    pub fn check(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let detail = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        Err(ControlApiError::command_failed(
            &self.command,
            self.code,
            &sanitize(detail),
        ))
    }
}

/// Run a platform tool, killing it if it outlives `limit`.
pub(crate) async fn run(
    program: &'static str,
    args: &[&str],
    limit: Duration,
) -> Result<CommandOutput> {
    let command_line = format!("{} {}", program, args.join(" "));
    log::debug!("Running `{}`", command_line);

    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null()).kill_on_drop(true);

    let output = match timeout(limit, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(ControlApiError::spawn(program, e)),
        Err(_) => return Err(ControlApiError::timeout(command_line, limit)),
    };

    Ok(CommandOutput {
        command: command_line,
        code: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

pub(crate) fn sanitize(output: &str) -> String {
    let mut result = output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .take(MAX_OUTPUT_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    if result.len() > MAX_OUTPUT_LEN {
        let mut cut = MAX_OUTPUT_LEN;
        while !result.is_char_boundary(cut) {
            cut -= 1;
        }
        result.truncate(cut);
        result.push_str("...");
    }

    result
}
