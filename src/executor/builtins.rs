use std::io::Write;
use std::path::Path;

use crate::error::ExecError;
use crate::session::Session;
use super::path_resolver::PathResolver;
use super::status::{ExitStatus, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Pwd,
    Which,
    Exit,
    Die,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [Builtin::Cd, Builtin::Pwd, Builtin::Which, Builtin::Exit, Builtin::Die];

    pub fn from_name(name: &str) -> Option<Self> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd => "cd",
            Builtin::Pwd => "pwd",
            Builtin::Which => "which",
            Builtin::Exit => "exit",
            Builtin::Die => "die",
        }
    }

    /// Runs the built-in. `args[0]` is the built-in's own name.
    ///
    /// Output goes to `out`; diagnostics are returned as errors for the caller
    /// to report, since a forked child must not touch the stderr lock.
    pub fn run(
        self,
        args: &[String],
        session: &mut Session,
        resolver: &PathResolver,
        out: &mut dyn Write,
    ) -> Result<Outcome, ExecError> {
        let operands = args.get(1..).unwrap_or(&[]);
        match self {
            Builtin::Cd => cd(operands, session),
            Builtin::Pwd => pwd(operands, session, out),
            Builtin::Which => which(operands, resolver, out),
            Builtin::Exit => {
                if !operands.is_empty() {
                    return Err(ExecError::builtin("exit: too many arguments"));
                }
                Ok(Outcome::terminate(ExitStatus::Success))
            }
            Builtin::Die => {
                writeln!(out, "{}", operands.join(" "))?;
                Ok(Outcome::terminate(ExitStatus::Failure))
            }
        }
    }
}

fn cd(operands: &[String], session: &mut Session) -> Result<Outcome, ExecError> {
    let [dir] = operands else {
        return Err(ExecError::builtin("cd: expected exactly one directory"));
    };
    session
        .change_dir(Path::new(dir))
        .map_err(|e| ExecError::builtin(format!("cd: {}: {}", dir, e)))?;
    Ok(Outcome::proceed(ExitStatus::Success))
}

fn pwd(operands: &[String], session: &Session, out: &mut dyn Write) -> Result<Outcome, ExecError> {
    if !operands.is_empty() {
        return Err(ExecError::builtin("pwd: does not accept arguments"));
    }
    let cwd = session.current_dir()?;
    writeln!(out, "{}", cwd.display())?;
    Ok(Outcome::proceed(ExitStatus::Success))
}

fn which(operands: &[String], resolver: &PathResolver, out: &mut dyn Write) -> Result<Outcome, ExecError> {
    let [name] = operands else {
        return Err(ExecError::builtin("which: expected exactly one name"));
    };
    if Builtin::from_name(name).is_some() {
        return Err(ExecError::builtin(format!("which: {}: shell built-in", name)));
    }
    let path = resolver
        .resolve(name)
        .ok_or_else(|| ExecError::builtin(format!("which: {}: not found", name)))?;
    writeln!(out, "{}", path.display())?;
    Ok(Outcome::proceed(ExitStatus::Success))
}
