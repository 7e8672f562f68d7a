/// Gate attached to a line by a leading `and` / `or` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    #[default]
    Always,
    IfSuccess, // and
    IfFailure, // or
}

/// One element of a pipeline: `args[0]` is the program or built-in name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub args: Vec<String>,
}

impl Stage {
    pub fn new<S: Into<String>>(args: impl IntoIterator<Item = S>) -> Self {
        Stage {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.args.first().map(|s| s.as_str()).unwrap_or("")
    }
}

/// Parsed form of one command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub condition: Condition,
}
