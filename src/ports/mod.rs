//! Port traits defining external boundaries.
//!
//! The splitter touches the outside world only through the filesystem.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::FileSystem;
