//! Module map: which top-level entries get split out, and where they go.

use std::path::Path;

use serde_yaml::Mapping;

use crate::error::{ModuleMapError, Result, SplitError};
use crate::ports::filesystem::FileSystem;

/// Built-in module table.
const DEFAULT_MODULES: &[(&str, &str)] = &[
    ("Health", "health.collection.json"),
    ("Auth", "auth.collection.json"),
    ("Friendship", "friendship.collection.json"),
    ("Post", "post.collection.json"),
    ("Feed", "feed.collection.json"),
    ("Reaction", "reaction.collection.json"),
    ("Comment", "comment.collection.json"),
    ("Chat", "chat.collection.json"),
    ("Admin", "admin.collection.json"),
];

/// Immutable, ordered mapping from module name to output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMap {
    entries: Vec<(String, String)>,
}

impl Default for ModuleMap {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_MODULES
                .iter()
                .map(|(module, file)| ((*module).to_string(), (*file).to_string())),
        )
    }
}

impl ModuleMap {
    /// Builds a map from `(module, file)` pairs. A repeated module keeps its
    /// first position and its last file name.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (module, file) in pairs {
            match entries.iter().position(|(existing, _)| *existing == module) {
                Some(index) => entries[index].1 = file,
                None => entries.push((module, file)),
            }
        }
        Self { entries }
    }

    /// Parses a YAML mapping of `Module: file.json` lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a YAML mapping of strings to strings.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, ModuleMapError> {
        if text.trim().is_empty() {
            return Ok(Self::from_pairs(Vec::new()));
        }
        let mapping: Mapping = serde_yaml::from_str(text)?;

        let mut pairs = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let module: String = serde_yaml::from_value(key)?;
            let file: String = serde_yaml::from_value(value)
                .map_err(|source| ModuleMapError::FileName { module: module.clone(), source })?;
            pairs.push((module, file));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Loads a YAML override file through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::ModuleMap`] if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        fs.read_to_string(path)
            .map_err(ModuleMapError::from)
            .and_then(|text| Self::from_yaml(&text))
            .map_err(|source| SplitError::ModuleMap {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Returns the output file name for `module`, if it is mapped.
    #[must_use]
    pub fn file_for(&self, module: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == module)
            .map(|(_, file)| file.as_str())
    }

    /// Iterates `(module, file)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(m, f)| (m.as_str(), f.as_str()))
    }

    /// Number of mapped modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no module is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
