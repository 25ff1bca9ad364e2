use std::fmt;
use std::process::{Command, ExitStatus};

use serde::Serialize;
use tracing::{debug, info};

use super::{Result, ToolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

/// Combined text printed by a finished tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    /// Stdout lines followed by stderr lines, each terminated by `\n`.
    pub text: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends `--name value`.
    pub fn option(self, name: &str, value: impl fmt::Display) -> Self {
        self.arg(format!("--{name}")).arg(value.to_string())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs to completion. A non-zero exit is reported in the output, only a
    /// launch failure is an error.
    pub fn run(&self) -> Result<ToolOutput> {
        info!(command = %self, "running external tool");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut text = String::new();
        for stream in [&output.stdout, &output.stderr] {
            for line in String::from_utf8_lossy(stream).lines() {
                text.push_str(line);
                text.push('\n');
            }
        }
        debug!(status = %output.status, bytes = text.len(), "external tool finished");
        Ok(ToolOutput::new(text, output.status))
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl ToolOutput {
    fn new(text: String, status: ExitStatus) -> Self {
        Self {
            text,
            exit_code: status.code(),
            success: status.success(),
        }
    }
}
