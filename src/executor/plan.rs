use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::BorrowedFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::ast::{Pipeline, Stage};
use crate::error::ExecError;
use crate::session::Session;
use super::builtins::Builtin;
use super::path_resolver::PathResolver;

const OUTPUT_MODE: u32 = 0o640;

/// What a stage turns into once its name has been looked up.
#[derive(Debug)]
pub enum Program {
    Builtin(Builtin),
    External { path: CString, argv: Vec<CString> },
    /// Reported by the stage's own child so sibling stages still run.
    Missing(String),
}

#[derive(Debug)]
pub struct StagePlan {
    pub args: Vec<String>,
    pub program: Program,
}

impl StagePlan {
    pub fn name(&self) -> &str {
        self.args.first().map(|s| s.as_str()).unwrap_or("")
    }
}

/// Either a descriptor borrowed from the session or a redirect file this plan owns.
#[derive(Debug)]
pub enum Binding {
    Inherited(RawFd),
    Opened(File),
}

impl Binding {
    pub fn as_raw_fd(&self) -> RawFd {
        match self {
            Binding::Inherited(fd) => *fd,
            Binding::Opened(file) => file.as_raw_fd(),
        }
    }

    /// An owned duplicate to write through; dropping it leaves the binding open.
    pub fn writer(&self) -> io::Result<File> {
        match self {
            Binding::Inherited(fd) => {
                // The session guarantees its descriptors outlive every execute call.
                let borrowed = unsafe { BorrowedFd::borrow_raw(*fd) };
                Ok(File::from(borrowed.try_clone_to_owned()?))
            }
            Binding::Opened(file) => file.try_clone(),
        }
    }
}

/// Everything needed to wire a pipeline, built before any process is spawned.
#[derive(Debug)]
pub struct PipelinePlan {
    pub stages: Vec<StagePlan>,
    pub input: Binding,
    pub output: Binding,
}

impl PipelinePlan {
    pub fn build(pipeline: &Pipeline, session: &Session, resolver: &PathResolver) -> Result<Self, ExecError> {
        let stages = pipeline
            .stages
            .iter()
            .map(|stage| plan_stage(stage, resolver))
            .collect::<Result<Vec<_>, _>>()?;

        let input = match &pipeline.input {
            Some(path) => Binding::Opened(
                File::open(path).map_err(|source| ExecError::Redirect { path: path.clone(), source })?,
            ),
            None => Binding::Inherited(session.input()),
        };
        let output = match &pipeline.output {
            Some(path) => Binding::Opened(
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(OUTPUT_MODE)
                    .open(path)
                    .map_err(|source| ExecError::Redirect { path: path.clone(), source })?,
            ),
            None => Binding::Inherited(session.output()),
        };

        Ok(PipelinePlan { stages, input, output })
    }

    /// A lone built-in runs in the calling process so `cd` and `exit` take effect there.
    pub fn inline_builtin(&self) -> Option<Builtin> {
        match self.stages.as_slice() {
            [StagePlan { program: Program::Builtin(builtin), .. }] => Some(*builtin),
            _ => None,
        }
    }
}

fn plan_stage(stage: &Stage, resolver: &PathResolver) -> Result<StagePlan, ExecError> {
    let name = stage.name();
    let program = if let Some(builtin) = Builtin::from_name(name) {
        Program::Builtin(builtin)
    } else if let Some(path) = resolver.resolve(name) {
        let argv = stage
            .args
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        Program::External {
            path: CString::new(path.as_os_str().as_bytes())?,
            argv,
        }
    } else {
        Program::Missing(name.to_string())
    };

    Ok(StagePlan {
        args: stage.args.clone(),
        program,
    })
}
