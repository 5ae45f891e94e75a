//! Quill binary: argument parsing, logging setup, exit codes.

use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// A minimal raw-mode terminal text editor.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
struct Args {
    /// File to edit; omit to start with an empty, unnamed buffer.
    file: Option<PathBuf>,
}

/// Diagnostics go to a file, never to the screen the editor owns.
/// Enabled only when `QUILL_LOG` is set (it doubles as the filter).
fn init_logging() {
    if std::env::var_os("QUILL_LOG").is_none() {
        return;
    }
    let Ok(log_file) = File::create(".quill.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("QUILL_LOG"))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match quill::run(args.file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Raw mode was already restored by the guard drop; clear
            // whatever the editor left on screen, then report.
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x1b[2J\x1b[H");
            let _ = stdout.flush();
            eprintln!("quill: {err}");
            ExitCode::FAILURE
        }
    }
}
