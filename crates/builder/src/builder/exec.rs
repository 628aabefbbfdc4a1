//! External command execution with captured, relayed output.

use anyhow::{bail, Context, Result};
use std::process::{Command, ExitStatus};

/// Captured result of one external command.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command to completion and captures its output.
pub trait CommandRunner {
    fn run(&mut self, cmd: &mut Command) -> Result<CommandOutput>;
}

/// Spawns real subprocesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &mut Command) -> Result<CommandOutput> {
        let output = cmd
            .output()
            .with_context(|| format!("Failed to run {}", cmd.get_program().to_string_lossy()))?;

        Ok(CommandOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `cmd`, relay its output, and fail on a non-zero exit status.
///
/// Stdout goes to stdout, stderr to stderr (only when non-empty). Output of a
/// failed command is relayed before the error is returned.
pub fn run_step(runner: &mut dyn CommandRunner, cmd: &mut Command) -> Result<()> {
    let line = display(cmd);
    log::debug!("running: {line}");

    let output = runner.run(cmd)?;
    relay(&output);

    if !output.status.success() {
        match output.status.code() {
            Some(code) => bail!("Command failed: {line} (exit status {code})"),
            None => bail!("Command failed: {line} (terminated by signal)"),
        }
    }
    Ok(())
}

/// Render a command line for diagnostics.
pub fn display(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|a| {
            let a = a.to_string_lossy();
            if a.contains(' ') {
                format!("\"{a}\"")
            } else {
                a.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn relay(output: &CommandOutput) {
    if !output.stdout.is_empty() {
        println!("{}", output.stdout.trim_end_matches('\n'));
    }
    if !output.stderr.is_empty() {
        eprintln!("{}", output.stderr.trim_end_matches('\n'));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[cfg(unix)]
    pub fn status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    pub fn status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }

    /// Records every command line and answers with scripted exit codes.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub calls: Vec<Vec<String>>,
        pub exit_codes: Vec<i32>,
    }

    impl RecordingRunner {
        pub fn with_exit_codes(exit_codes: &[i32]) -> Self {
            Self {
                calls: Vec::new(),
                exit_codes: exit_codes.to_vec(),
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, cmd: &mut Command) -> Result<CommandOutput> {
            let line = std::iter::once(cmd.get_program())
                .chain(cmd.get_args())
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            let code = self.exit_codes.get(self.calls.len()).copied().unwrap_or(0);
            self.calls.push(line);

            Ok(CommandOutput {
                status: status(code),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }
}
