//! External native tools.
//!
//! Image processing is delegated to command line programs; this module builds
//! their invocations and collects what they print.

mod command;
mod ctf;
mod error;

#[cfg(test)]
mod tests;

pub use command::{ToolCommand, ToolOutput};
pub use ctf::{CTF_ESTIMATE_PROGRAM, CtfEstimateTask, EllipseCtf, TaskOutcome};
pub use error::{Result, ToolError};
