//! `treelingo` CLI entrypoint.
//!
//! Translates keys and lists the contents of translation directories.
//! Usage errors exit with status 2 (reported by clap); configuration and
//! lookup failures exit with status 1.

use std::error::Error;
use std::io::{self, Write};

use clap::Parser;
use treelingo_cli::cli::Cli;
use treelingo_cli::commands::{run, working_directory};
use treelingo_cli::error::Result;

fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let run_result = working_directory().and_then(|dir| run(&cli, &dir, &mut stdout));
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            let mut cause = err.source();
            while let Some(source) = cause {
                write_stderr_line(stderr, format_args!("  caused by: {source}"));
                cause = source.source();
            }
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
