use std::{ffi, io};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Sys(#[from] nix::Error),
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: nix::Error,
    },
    #[error("{0}: command not found")]
    CommandNotFound(String),
    #[error("{0}")]
    Builtin(String),
    #[error("argument contains a NUL byte: {0}")]
    Nul(#[from] ffi::NulError),
}

impl ExecError {
    pub fn builtin(msg: impl Into<String>) -> Self {
        ExecError::Builtin(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ExecError::CommandNotFound("frob".into()).to_string(), "frob: command not found");
        assert_eq!(ExecError::builtin("cd: wrong number of arguments").to_string(), "cd: wrong number of arguments");

        let err = ExecError::Redirect {
            path: "in.txt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "in.txt: No such file or directory");
    }
}
