use nix::sys::wait::WaitStatus;

/// Two-valued result of a line, as seen by `and` / `or` on the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatus {
    #[default]
    Success,
    Failure,
}

impl ExitStatus {
    pub fn from_code(code: i32) -> Self {
        if code == 0 { ExitStatus::Success } else { ExitStatus::Failure }
    }

    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<WaitStatus> for ExitStatus {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => ExitStatus::from_code(code),
            // Killed by a signal, or anything else waitpid reports
            _ => ExitStatus::Failure,
        }
    }
}

/// What one `execute` call hands back to the read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: ExitStatus,
    pub should_exit: bool,
}

impl Outcome {
    pub fn proceed(status: ExitStatus) -> Self {
        Outcome { status, should_exit: false }
    }

    pub fn terminate(status: ExitStatus) -> Self {
        Outcome { status, should_exit: true }
    }
}
