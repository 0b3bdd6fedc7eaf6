//! Live adapters for real external interactions.

pub mod filesystem;
