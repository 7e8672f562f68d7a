use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::mem::ManuallyDrop;
use std::os::fd::{FromRawFd, OwnedFd};
use std::os::unix::io::{AsRawFd, RawFd};

use log::{debug, error};
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::{dup2, execv, fork, pipe2, ForkResult, Pid};

use crate::ast::Pipeline;
use crate::error::ExecError;
use crate::session::Session;
use super::executor::{should_run, Executor};
use super::path_resolver::PathResolver;
use super::plan::{PipelinePlan, Program, StagePlan};
use super::status::{ExitStatus, Outcome};

pub struct DefaultExecutor {
    session: Session,
    resolver: PathResolver,
}

impl Executor for DefaultExecutor {
    fn execute(&mut self, pipeline: Option<&Pipeline>, prior: ExitStatus) -> Outcome {
        let Some(pipeline) = pipeline.filter(|p| is_runnable(p)) else {
            return Outcome::proceed(prior);
        };
        if !should_run(pipeline.condition, prior) {
            debug!("skipping {:?} line after {:?}", pipeline.condition, prior);
            return Outcome::proceed(prior);
        }

        match self.run(pipeline) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("mysh: {}", e);
                Outcome::proceed(ExitStatus::Failure)
            }
        }
    }
}

/// A hand-built pipeline with no stages, or with a stage that names nothing, runs nothing.
fn is_runnable(pipeline: &Pipeline) -> bool {
    !pipeline.stages.is_empty() && pipeline.stages.iter().all(|stage| !stage.args.is_empty())
}

impl DefaultExecutor {
    pub fn new(session: Session) -> Self {
        DefaultExecutor::with_resolver(session, PathResolver::default())
    }

    pub fn with_resolver(session: Session, resolver: PathResolver) -> Self {
        DefaultExecutor { session, resolver }
    }

    fn run(&mut self, pipeline: &Pipeline) -> Result<Outcome, ExecError> {
        let plan = PipelinePlan::build(pipeline, &self.session, &self.resolver)?;

        if let Some(builtin) = plan.inline_builtin() {
            debug!("running {} in process", builtin.name());
            let mut out = plan.output.writer()?;
            return builtin.run(&plan.stages[0].args, &mut self.session, &self.resolver, &mut out);
        }

        self.spawn_pipeline(plan).map(Outcome::proceed)
    }

    fn spawn_pipeline(&self, plan: PipelinePlan) -> Result<ExitStatus, ExecError> {
        let PipelinePlan { stages, input, output } = plan;
        let last = stages.len() - 1;

        // Children must not inherit unflushed text from our own buffer
        io::stdout().flush()?;

        let mut children: Vec<Pid> = Vec::with_capacity(stages.len());
        let mut read_end: Option<OwnedFd> = None;
        let mut aborted: Option<ExecError> = None;

        for (i, stage) in stages.iter().enumerate() {
            let (next_read, write_end) = if i < last {
                match pipe2(OFlag::O_CLOEXEC) {
                    Ok((r, w)) => (Some(r), Some(w)),
                    Err(e) => {
                        error!("pipe failed before stage {}: {}", i, e);
                        aborted = Some(e.into());
                        break;
                    }
                }
            } else {
                (None, None)
            };

            let stdin_fd = read_end.as_ref().map_or(input.as_raw_fd(), |fd| fd.as_raw_fd());
            let stdout_fd = write_end.as_ref().map_or(output.as_raw_fd(), |fd| fd.as_raw_fd());

            // The child only rebinds descriptors, then execs or runs a built-in and _exits.
            match unsafe { fork() } {
                Ok(ForkResult::Parent { child }) => {
                    debug!("spawned {} as pid {}", stage.name(), child);
                    children.push(child);
                }
                Ok(ForkResult::Child) => {
                    drop(next_read);
                    let mut session = self.session;
                    run_child(stage, stdin_fd, stdout_fd, &mut session, &self.resolver);
                }
                Err(e) => {
                    error!("fork failed at stage {}: {}", i, e);
                    aborted = Some(e.into());
                    break;
                }
            }

            drop(write_end);
            read_end = next_read;
        }

        drop(read_end);
        drop(input);
        drop(output);

        let mut status = ExitStatus::Failure;
        for (i, pid) in children.iter().enumerate() {
            match wait_for(*pid) {
                Ok(s) if i == last => status = s,
                Ok(_) => {}
                Err(e) => error!("waitpid({}) failed: {}", pid, e),
            }
        }

        match aborted {
            Some(e) => Err(e),
            None => Ok(status),
        }
    }
}

fn wait_for(pid: Pid) -> Result<ExitStatus, ExecError> {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                debug!("pid {} finished: {:?}", pid, status);
                return Ok(ExitStatus::from(status));
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn run_child(stage: &StagePlan, stdin_fd: RawFd, stdout_fd: RawFd, session: &mut Session, resolver: &PathResolver) -> ! {
    let code = match child_main(stage, stdin_fd, stdout_fd, session, resolver) {
        Ok(status) => status.code(),
        Err(e) => {
            child_diagnostic(&e);
            ExitStatus::Failure.code()
        }
    };
    unsafe { libc::_exit(code) }
}

fn child_main(
    stage: &StagePlan,
    stdin_fd: RawFd,
    stdout_fd: RawFd,
    session: &mut Session,
    resolver: &PathResolver,
) -> Result<ExitStatus, ExecError> {
    // Rust starts us with SIGPIPE ignored, and execv keeps an ignored disposition.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }?;

    if stdin_fd != libc::STDIN_FILENO {
        dup2(stdin_fd, libc::STDIN_FILENO)?;
    }
    if stdout_fd != libc::STDOUT_FILENO {
        dup2(stdout_fd, libc::STDOUT_FILENO)?;
    }

    match &stage.program {
        Program::Builtin(builtin) => {
            // fd 1 stays open for _exit to close
            let mut out = ManuallyDrop::new(unsafe { File::from_raw_fd(libc::STDOUT_FILENO) });
            Ok(builtin.run(&stage.args, session, resolver, &mut *out)?.status)
        }
        Program::External { path, argv } => match execv(path, argv) {
            Ok(never) => match never {},
            Err(source) => Err(ExecError::Exec {
                program: stage.name().to_string(),
                source,
            }),
        },
        Program::Missing(name) => Err(ExecError::CommandNotFound(name.clone())),
    }
}

// Straight to fd 2 without building a String: the stderr lock or the allocator
// may have been held by another thread at fork time.
fn child_diagnostic(err: &ExecError) {
    let _ = fmt::write(&mut RawWriter(libc::STDERR_FILENO), format_args!("mysh: {}\n", err));
}

/// Unbuffered `fmt::Write` over a raw descriptor, one `write(2)` per piece.
struct RawWriter(RawFd);

impl fmt::Write for RawWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let n = unsafe { libc::write(self.0, bytes.as_ptr().cast(), bytes.len()) };
            if n < 0 && Errno::last() == Errno::EINTR {
                continue;
            }
            if n <= 0 {
                return Err(fmt::Error);
            }
            bytes = &bytes[n as usize..];
        }
        Ok(())
    }
}
