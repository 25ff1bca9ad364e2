use std::path::Path;

use crate::tools::{CtfEstimateTask, EllipseCtf, TaskOutcome, ToolCommand, ToolOutput};

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct ToolService;

impl ToolService {
    pub fn ctf_task(
        &self,
        ctf: &EllipseCtf,
        angle: f64,
        psd: impl AsRef<Path>,
        row: usize,
    ) -> CtfEstimateTask {
        CtfEstimateTask::new(ctf, angle, psd, row)
    }

    pub fn run_task(&self, task: &CtfEstimateTask) -> Result<TaskOutcome> {
        Ok(task.run()?)
    }

    pub fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        Ok(command.run()?)
    }
}
