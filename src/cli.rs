//! CLI argument definitions.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{Result, SplitError};

/// Source collection location relative to the collections directory.
pub const DEFAULT_SOURCE: &str = "../POSTMAN_COLLECTION.json";

/// Top-level CLI parser for `postman-split`.
#[derive(Debug, Parser)]
#[command(
    name = "postman-split",
    version,
    about = "Split a Postman collection into per-module collection files"
)]
pub struct Cli {
    /// Directory the source is resolved against and outputs are written to.
    /// Defaults to the directory containing this executable.
    #[arg(long, env = "POSTMAN_SPLIT_DIR", value_name = "DIR")]
    pub collections_dir: Option<PathBuf>,

    /// Source collection file.
    #[arg(long, env = "POSTMAN_SPLIT_SOURCE", value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Directory for the split collections (overrides the collections directory).
    #[arg(long, env = "POSTMAN_SPLIT_OUT_DIR", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// YAML file mapping module names to output file names.
    #[arg(long, env = "POSTMAN_SPLIT_MODULE_MAP", value_name = "FILE")]
    pub module_map: Option<PathBuf>,

    /// Print the files that would be created without writing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Concrete input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Source collection file.
    pub source: PathBuf,
    /// Directory receiving the split collections.
    pub out_dir: PathBuf,
}

impl Cli {
    /// Resolves source and output paths, anchoring defaults on the
    /// executable's directory.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ExecutableDir`] if a default is needed and the
    /// executable path cannot be determined.
    pub fn paths(&self) -> Result<Paths> {
        let base = match &self.collections_dir {
            Some(dir) => dir.clone(),
            None if self.source.is_some() && self.out_dir.is_some() => PathBuf::new(),
            None => executable_dir()?,
        };
        Ok(self.paths_from(&base))
    }

    /// Resolves paths against an explicit collections directory.
    #[must_use]
    pub fn paths_from(&self, base: &Path) -> Paths {
        Paths {
            source: self.source.clone().unwrap_or_else(|| base.join(DEFAULT_SOURCE)),
            out_dir: self.out_dir.clone().unwrap_or_else(|| base.to_path_buf()),
        }
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(SplitError::ExecutableDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        SplitError::ExecutableDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}
