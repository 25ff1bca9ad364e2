use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Result, ToolCommand, ToolOutput};

pub const CTF_ESTIMATE_PROGRAM: &str = "xmipp_ctf_estimate_from_psd";

/// Microscope parameters and defocus fitted to a PSD ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseCtf {
    /// Angstrom per pixel.
    pub sampling_rate: f64,
    /// kV.
    pub voltage: f64,
    /// mm.
    pub spherical_aberration: f64,
    pub defocus_u: f64,
    pub defocus_v: f64,
}

/// One CTF re-estimation for a row of a micrograph table.
#[derive(Debug, Clone, PartialEq)]
pub struct CtfEstimateTask {
    row: usize,
    command: ToolCommand,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskOutcome {
    pub row: usize,
    pub output: ToolOutput,
}

impl CtfEstimateTask {
    pub fn new(ctf: &EllipseCtf, angle: f64, psd: impl AsRef<Path>, row: usize) -> Self {
        let command = ToolCommand::new(CTF_ESTIMATE_PROGRAM)
            .option("sampling_rate", ctf.sampling_rate)
            .option("kV", ctf.voltage)
            .option("Cs", ctf.spherical_aberration)
            .option("defocusU", ctf.defocus_u)
            .option("defocusV", ctf.defocus_v)
            .option("azimuthal_angle", angle)
            .option("psd", psd.as_ref().display());
        Self { row, command }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    pub fn run(&self) -> Result<TaskOutcome> {
        let output = self.command.run()?;
        Ok(TaskOutcome {
            row: self.row,
            output,
        })
    }
}
