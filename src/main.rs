//! decomment: Strip comments from source trees and git repositories
//!
//! Removes comment spans per language: a syntax-aware, docstring-preserving
//! pass for Python and best-effort regex removal for other recognized
//! languages, with backups before every mutation.

use std::process::ExitCode;

mod backup;
mod cli;
mod config;
mod credentials;
mod domain;
mod error;
mod process;
mod repo;
mod strip;
mod utils;
mod walk;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(error::exit_code(&err))
        }
    }
}
