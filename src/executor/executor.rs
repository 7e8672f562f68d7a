use crate::ast::{Condition, Pipeline};
use super::status::{ExitStatus, Outcome};

pub trait Executor {
    /// Runs one parsed line. `None` is a line with nothing to run.
    fn execute(&mut self, pipeline: Option<&Pipeline>, prior: ExitStatus) -> Outcome;
}

/// Whether a line gated by `condition` runs after a line that ended with `prior`.
pub fn should_run(condition: Condition, prior: ExitStatus) -> bool {
    match condition {
        Condition::Always => true,
        Condition::IfSuccess => prior.is_success(),
        Condition::IfFailure => !prior.is_success(),
    }
}
