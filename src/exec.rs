//! External command execution.
//!
//! Commands run to completion with stdout and stderr captured, never streamed.
//! There is no timeout: a hung `git` or `cargo` blocks the release.

use crate::error::{ReleaseError, Result};
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// An argument vector for an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }

    pub fn cargo<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("cargo", args)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// What to do when a command exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Stop the release with `CommandFailed`.
    #[default]
    Abort,
    /// Report the failure and hand the output back to the caller.
    Continue,
}

/// Runs external programs.
pub trait CommandRunner {
    /// Runs `invocation` to completion, capturing its output.
    ///
    /// Returns `Err` only if the program could not be started.
    fn output(&mut self, invocation: &Invocation) -> std::io::Result<CommandOutput>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    current_dir: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every command in `dir` instead of the current directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn output(&mut self, invocation: &Invocation) -> std::io::Result<CommandOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs a command, reporting failures on stderr.
///
/// With [`OnFailure::Abort`] a non-zero exit becomes `CommandFailed`. A
/// program that cannot be started is always `CommandFailed`.
pub fn run_command(
    runner: &mut dyn CommandRunner,
    invocation: &Invocation,
    on_failure: OnFailure,
) -> Result<CommandOutput> {
    println!("{} {}", "> Executing:".dimmed(), invocation);
    log::debug!("Running {:?}", invocation);

    let output = runner.output(invocation).map_err(|e| {
        eprintln!("{} {}", "Error executing command:".red().bold(), invocation);
        eprintln!("{}", e);
        ReleaseError::CommandFailed {
            command: invocation.to_string(),
            stderr: e.to_string(),
        }
    })?;

    if !output.success {
        eprintln!("{} {}", "Error executing command:".red().bold(), invocation);
        eprintln!("{}", output.stderr);
        log::debug!("Exit code: {:?}", output.code);

        if on_failure == OnFailure::Abort {
            return Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                stderr: output.stderr,
            });
        }
    }

    Ok(output)
}
