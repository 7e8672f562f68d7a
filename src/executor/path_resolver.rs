use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

/// Directories searched for bare program names, in order.
pub const SEARCH_DIRS: [&str; 3] = ["/usr/local/bin", "/usr/bin", "/bin"];

#[derive(Debug, Clone)]
pub struct PathResolver {
    dirs: Vec<PathBuf>,
}

impl Default for PathResolver {
    fn default() -> Self {
        PathResolver::new(SEARCH_DIRS)
    }
}

impl PathResolver {
    pub fn new<P: Into<PathBuf>>(dirs: impl IntoIterator<Item = P>) -> Self {
        PathResolver {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        if command.is_empty() {
            return None;
        }

        if command.contains('/') {
            let path = Path::new(command);
            return is_executable(path).then(|| path.to_path_buf());
        }

        self.dirs
            .iter()
            .map(|dir| dir.join(command))
            .find(|candidate| is_executable(candidate))
    }
}

fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
