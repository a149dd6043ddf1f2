//! Retrace entrypoint.
//!
//! Wires the command stream (stdin or a script file) through the parser and
//! dispatcher against a fresh editor state. The runtime is strictly
//! single-threaded and synchronous: it blocks on input between commands and
//! every side effect of a command is complete before the next one is read.

use anyhow::Result;
use clap::Parser;
use core_actions::{CommandReader, dispatch, parse_command};
use core_config::Config;
use core_state::EditorState;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "retrace", version, about = "Line editor with a rewindable history")]
struct Args {
    /// Optional command script to run instead of reading stdin.
    pub script: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `retrace.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Why the session loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Quit,
    EndOfInput,
}

impl SessionEnd {
    fn as_str(&self) -> &'static str {
        match self {
            SessionEnd::Quit => "quit_command",
            SessionEnd::EndOfInput => "end_of_input",
        }
    }
}

fn configure_logging(config: &Config) -> Option<WorkerGuard> {
    let log_path = &config.file.log.file;
    let log_dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("retrace.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.file.log.level));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; drop the guard so the
        // writer thread shuts down.
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Drive one command stream to completion.
///
/// Malformed command lines are logged and skipped; the collaborator contract
/// says they cannot occur, but a bad line must not take the session down.
fn run_session<R, W>(mut reader: CommandReader<R>, out: &mut W) -> Result<SessionEnd>
where
    R: BufRead,
    W: Write,
{
    let mut state = EditorState::new();
    while let Some(raw) = reader.command_line()? {
        match parse_command(&raw) {
            Ok(command) => {
                if dispatch(command, &mut state, &mut reader, out)?.quit {
                    return Ok(SessionEnd::Quit);
                }
            }
            Err(err) => {
                warn!(target: "runtime", %err, "malformed_command_skipped");
            }
        }
    }
    Ok(SessionEnd::EndOfInput)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;
    let _log_guard = configure_logging(&config);
    install_panic_hook();
    info!(target: "runtime", script = ?args.script, "startup");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let end = match &args.script {
        Some(path) => {
            let file = File::open(path)?;
            run_session(CommandReader::new(BufReader::new(file)), &mut out)?
        }
        None => run_session(CommandReader::new(io::stdin().lock()), &mut out)?,
    };
    out.flush()?;

    info!(target: "runtime.shutdown", reason = end.as_str(), "shutdown");
    Ok(())
}
