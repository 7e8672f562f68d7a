mod executor;
mod default_executor;
mod builtins;
mod path_resolver;
mod plan;
mod status;

pub use executor::{should_run, Executor};
pub use default_executor::DefaultExecutor;
pub use builtins::Builtin;
pub use path_resolver::{PathResolver, SEARCH_DIRS};
pub use plan::{Binding, PipelinePlan, Program, StagePlan};
pub use status::{ExitStatus, Outcome};
