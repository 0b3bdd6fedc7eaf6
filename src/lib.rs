//! Core library entry for the `postman-split` CLI.
//!
//! Reads one monolithic Postman collection and writes one collection file per
//! module listed in the [`module_map::ModuleMap`], copying the shared schema
//! and variables into each.

pub mod adapters;
pub mod cli;
pub mod collection;
pub mod error;
pub mod module_map;
pub mod ports;
pub mod splitter;

use clap::Parser;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::error::SplitError;
use crate::module_map::ModuleMap;
use crate::ports::filesystem::FileSystem;
use crate::splitter::{SplitReport, Splitter};

/// Failure of a CLI run: bad arguments or a fatal split error.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Argument parsing failed, or help/version was requested.
    #[error(transparent)]
    Args(#[from] clap::Error),
    /// The split itself failed.
    #[error("Error: {0}")]
    Split(#[from] SplitError),
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or the split fails.
pub fn run<I, T>(args: I) -> Result<SplitReport, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    Ok(run_with(&cli, &LiveFileSystem)?)
}

/// Run a parsed command line against the given filesystem.
///
/// # Errors
///
/// Returns an error if paths cannot be resolved, the module map or source
/// cannot be loaded, or an output file cannot be written.
pub fn run_with(cli: &cli::Cli, fs: &dyn FileSystem) -> Result<SplitReport, SplitError> {
    let paths = cli.paths()?;
    let modules = match &cli.module_map {
        Some(path) => ModuleMap::load(fs, path)?,
        None => ModuleMap::default(),
    };

    let source = splitter::load(fs, &paths.source)?;
    Splitter::new(fs, &modules, paths.out_dir)
        .dry_run(cli.dry_run)
        .split(&source)
}
