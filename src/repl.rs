use std::io::BufRead;

use log::{debug, error};

use crate::config::Config;
use crate::executor::{DefaultExecutor, Executor, ExitStatus};
use crate::parser;
use crate::prompt::ShellPrompt;
use crate::session::Session;

/// Feeds lines to the executor until end of input, `exit` or `die`.
///
/// Returns the process exit code: 0 after `exit` or end of input, 1 after `die`.
pub fn start<R: BufRead>(prompt: &mut ShellPrompt<R>, config: &Config) -> i32 {
    let session = Session::new(prompt.is_interactive());
    let mut executor = DefaultExecutor::new(session);
    let mut status = ExitStatus::Success;

    if session.is_interactive() {
        println!("{}", config.welcome);
    }

    loop {
        if let Err(e) = prompt.show_prompt() {
            error!("cannot write prompt: {}", e);
        }

        let line = match prompt.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("mysh: read error: {}", e);
                break;
            }
        };

        let pipeline = match parser::parse(&line) {
            Ok(pipeline) => Some(pipeline),
            Err(e) if e.is_blank() => None,
            Err(e) => {
                eprintln!("mysh: syntax error: {}", e);
                None
            }
        };

        let outcome = executor.execute(pipeline.as_ref(), status);
        status = outcome.status;
        if outcome.should_exit {
            debug!("terminating with {:?}", status);
            return status.code();
        }
    }

    if session.is_interactive() {
        println!("{}", config.farewell);
    }
    0
}
