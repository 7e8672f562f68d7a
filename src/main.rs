use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use log::LevelFilter;

use mysh::config::{Config, ConfigLoader};
use mysh::prompt::ShellPrompt;
use mysh::{logging, repl};

/// A small command interpreter with pipes, redirects and and/or chaining.
#[derive(FromArgs)]
struct Args {
    /// script to run instead of reading commands from stdin
    #[argh(positional)]
    script: Option<PathBuf>,

    /// configuration file (default: ~/.myshrc when present)
    #[argh(option)]
    config: Option<PathBuf>,

    /// log debug information to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn load_config(explicit: Option<&PathBuf>) -> Result<Config, String> {
    if let Some(path) = explicit {
        return ConfigLoader::load_from_file(path).map_err(|e| format!("{}: {}", path.display(), e));
    }
    let Some(home) = std::env::var_os("HOME") else {
        return Ok(Config::default());
    };
    let path = PathBuf::from(home).join(".myshrc");
    if !path.exists() {
        return Ok(Config::default());
    }
    ConfigLoader::load_from_file(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mysh: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(if args.verbose { LevelFilter::Debug } else { config.log_level });

    let code = match &args.script {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("mysh: {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            let interactive = file.is_terminal();
            let mut prompt = ShellPrompt::new(BufReader::new(file), &config.prompt, interactive);
            repl::start(&mut prompt, &config)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut prompt = ShellPrompt::new(stdin.lock(), &config.prompt, interactive);
            repl::start(&mut prompt, &config)
        }
    };

    ExitCode::from(code as u8)
}
