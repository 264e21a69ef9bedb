//! External tool invocation.
//!
//! Tools run to completion with stdout and stderr captured. A missing
//! binary and a non-zero exit are distinct errors; both carry whatever the
//! user needs to act on them.

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("`{tool}` not found on PATH; install it and try again")]
    NotFound { tool: String },
    #[error("`{tool}` failed ({status}){}", render_output(output))]
    Failed {
        tool: String,
        status: ExitStatus,
        /// Combined stdout and stderr.
        output: String,
    },
    #[error("cannot run `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
}

fn render_output(output: &str) -> String {
    let output = output.trim_end();
    if output.is_empty() {
        String::new()
    } else {
        format!(":\n{output}")
    }
}

/// How a tool process ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Code(i32),
    Signal,
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Code(code) => write!(f, "exit code {code}"),
            ExitStatus::Signal => f.write_str("terminated by signal"),
        }
    }
}

/// One invocation of an external program.
#[derive(Clone, Debug)]
pub struct Tool {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    cwd: Option<PathBuf>,
}

impl Tool {
    pub fn new(program: impl Into<String>) -> Self {
        Tool {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command line for logs and messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args.iter().map(OsStr::new));
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run to completion and return the combined output.
    pub fn run(&self) -> Result<String, ToolError> {
        tracing::debug!(command = %self.display(), "running tool");
        let output = self.command().output().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ToolError::NotFound {
                    tool: self.program.clone(),
                }
            } else {
                ToolError::Spawn {
                    tool: self.program.clone(),
                    source,
                }
            }
        })?;
        let combined = combine(&output);
        if output.status.success() {
            return Ok(combined);
        }
        let status = output
            .status
            .code()
            .map_or(ExitStatus::Signal, ExitStatus::Code);
        tracing::debug!(command = %self.display(), %status, "tool failed");
        Err(ToolError::Failed {
            tool: self.program.clone(),
            status,
            output: combined,
        })
    }
}

fn combine(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !text.is_empty() && !stderr.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&stderr);
    text
}

#[cfg(test)]
mod tests;
