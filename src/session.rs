use std::io;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

use log::debug;

/// Process-wide state a pipeline runs against.
///
/// The default descriptors are borrowed from the caller and never closed here.
/// The working directory is the real one of this process, so files opened and
/// programs spawned after a `cd` see the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    input: RawFd,
    output: RawFd,
    interactive: bool,
}

impl Session {
    pub fn new(interactive: bool) -> Self {
        Session::with_descriptors(libc::STDIN_FILENO, libc::STDOUT_FILENO, interactive)
    }

    pub fn with_descriptors(input: RawFd, output: RawFd, interactive: bool) -> Self {
        Session { input, output, interactive }
    }

    pub fn input(&self) -> RawFd {
        self.input
    }

    pub fn output(&self) -> RawFd {
        self.output
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    pub fn change_dir(&mut self, dir: &Path) -> io::Result<()> {
        std::env::set_current_dir(dir)?;
        debug!("working directory is now {}", dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_binds_standard_descriptors() {
        let session = Session::new(true);
        assert_eq!(session.input(), libc::STDIN_FILENO);
        assert_eq!(session.output(), libc::STDOUT_FILENO);
        assert!(session.is_interactive());
        assert!(!Session::with_descriptors(5, 6, false).is_interactive());
    }
}
