//! Filesystem port for collection I/O.

use std::io;
use std::path::Path;

/// Reads source collections and writes split ones.
///
/// Abstracting the filesystem lets the splitter run against an in-memory
/// store in tests, including write failures the real disk rarely produces.
pub trait FileSystem {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes `contents` to `path`, replacing any existing file.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}
