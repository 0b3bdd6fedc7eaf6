//! Splits a monolithic collection into per-module collection files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::collection::{entry_name, OutputDocument, SourceDocument};
use crate::error::{Result, SplitError};
use crate::module_map::ModuleMap;
use crate::ports::filesystem::FileSystem;

/// One output file produced by a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Module name of the source entry.
    pub module: String,
    /// File name from the module map.
    pub file_name: String,
    /// Full destination path.
    pub path: PathBuf,
}

/// Outcome of a split run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Files written (or, in a dry run, that would have been written).
    pub files: Vec<WrittenFile>,
    /// Top-level entries that had no mapped module.
    pub skipped: usize,
}

/// Loads and parses the source collection.
///
/// # Errors
///
/// Returns [`SplitError::Read`] if the file cannot be read and
/// [`SplitError::Parse`] if it is not a valid collection.
pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<SourceDocument> {
    let content = fs.read_to_string(path).map_err(|source| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source = SourceDocument::from_json(&content).map_err(|source| SplitError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded source collection");
    Ok(source)
}

/// Writes one collection file per mapped top-level entry.
pub struct Splitter<'a> {
    fs: &'a dyn FileSystem,
    modules: &'a ModuleMap,
    out_dir: PathBuf,
    dry_run: bool,
}

impl<'a> Splitter<'a> {
    /// Creates a splitter writing into `out_dir`.
    #[must_use]
    pub fn new(
        fs: &'a dyn FileSystem,
        modules: &'a ModuleMap,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            modules,
            out_dir: out_dir.into(),
            dry_run: false,
        }
    }

    /// Reports what would be written without touching the filesystem.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Splits `source` into per-module files.
    ///
    /// Entries are processed in file order. Unmapped or unnamed entries are
    /// skipped. When two entries map to the same file the later one wins.
    ///
    /// # Errors
    ///
    /// Stops at the first failure. Files written before it stay on disk.
    pub fn split(&self, source: &SourceDocument) -> Result<SplitReport> {
        let variable = source.shared_variables();
        let mut report = SplitReport::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for entry in &source.item {
            let Some((module, file_name)) = entry_name(entry)
                .and_then(|name| self.modules.file_for(name).map(|file| (name, file)))
            else {
                debug!(name = entry_name(entry).unwrap_or("<unnamed>"), "skipping unmapped entry");
                report.skipped += 1;
                continue;
            };

            let schema = source
                .schema()
                .ok_or_else(|| SplitError::MissingSchema { module: module.to_string() })?;
            let document = OutputDocument::for_module(module, entry, schema, variable);
            let json = document.to_pretty_json().map_err(|source| SplitError::Serialize {
                module: module.to_string(),
                source,
            })?;

            let path = self.out_dir.join(file_name);
            if !seen.insert(file_name) {
                warn!(module, file = file_name, "overwriting file written earlier in this run");
            }

            if self.dry_run {
                println!("Would create {file_name}");
            } else {
                self.fs
                    .write(&path, &json)
                    .map_err(|source| SplitError::Write { path: path.clone(), source })?;
                info!(module, path = %path.display(), "wrote module collection");
                println!("Created {file_name}");
            }

            report.files.push(WrittenFile {
                module: module.to_string(),
                file_name: file_name.to_string(),
                path,
            });
        }

        if self.dry_run {
            println!("\nDry run complete, no files written.");
        } else {
            println!("\nAll collections created successfully!");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::io;

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    /// In-memory filesystem; paths listed in `read_only` reject writes.
    #[derive(Default)]
    struct MemoryFileSystem {
        files: RefCell<BTreeMap<PathBuf, String>>,
        writes: RefCell<Vec<PathBuf>>,
        read_only: Vec<PathBuf>,
    }

    impl MemoryFileSystem {
        fn with_file(path: &str, contents: &str) -> Self {
            let fs = Self::default();
            fs.files.borrow_mut().insert(PathBuf::from(path), contents.to_string());
            fs
        }

        fn json(&self, path: &str) -> Value {
            let files = self.files.borrow();
            serde_json::from_str(&files[Path::new(path)]).unwrap()
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            if self.read_only.iter().any(|p| p == path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.writes.borrow_mut().push(path.to_path_buf());
            self.files.borrow_mut().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    const SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

    fn source(value: &Value) -> SourceDocument {
        serde_json::from_value(value.clone()).unwrap()
    }

    #[test]
    fn load_reports_missing_file() {
        let fs = MemoryFileSystem::default();
        let err = load(&fs, Path::new("../POSTMAN_COLLECTION.json")).unwrap_err();
        assert!(matches!(err, SplitError::Read { .. }));
    }

    #[test]
    fn load_reports_malformed_json() {
        let fs = MemoryFileSystem::with_file("src.json", "{ not json");
        let err = load(&fs, Path::new("src.json")).unwrap_err();
        assert!(matches!(err, SplitError::Parse { .. }));
    }

    #[test]
    fn auth_scenario_writes_expected_document() {
        let doc = source(&json!({
            "info": {"name": "Everything", "schema": SCHEMA},
            "variable": [{"key": "baseUrl", "value": "http://x"}],
            "item": [{"name": "Auth", "item": [{"name": "Login"}]}],
        }));
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let report = Splitter::new(&fs, &map, "/out").split(&doc).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file_name, "auth.collection.json");
        assert_eq!(
            fs.json("/out/auth.collection.json"),
            json!({
                "info": {"name": "Auth API", "description": "Auth endpoints", "schema": SCHEMA},
                "variable": [{"key": "baseUrl", "value": "http://x"}],
                "item": [{"name": "Login"}],
            })
        );
    }

    #[test]
    fn unknown_and_unnamed_entries_are_skipped() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "item": [{"name": "Unknown"}, {"description": "no name"}, {"name": "Chat"}],
        }));
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let report = Splitter::new(&fs, &map, "/out").split(&doc).unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(*fs.writes.borrow(), vec![PathBuf::from("/out/chat.collection.json")]);
        assert_eq!(fs.json("/out/chat.collection.json")["variable"], json!([]));
    }

    #[test]
    fn only_mapped_entries_produce_files_in_order() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "item": [
                {"name": "Admin", "item": []},
                {"name": "Misc", "item": []},
                {"name": "Health", "request": {"method": "GET"}},
                {"name": "Feed", "item": [{"name": "Get feed"}]},
            ],
        }));
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let report = Splitter::new(&fs, &map, "/out").split(&doc).unwrap();

        let names: Vec<&str> = report.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["admin.collection.json", "health.collection.json", "feed.collection.json"]);
        assert_eq!(
            fs.json("/out/health.collection.json")["item"],
            json!([{"name": "Health", "request": {"method": "GET"}}])
        );
        assert_eq!(fs.json("/out/admin.collection.json")["item"], json!([]));
    }

    #[test]
    fn later_entry_overwrites_same_file() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "item": [
                {"name": "Post", "item": [{"name": "first"}]},
                {"name": "Post", "item": [{"name": "second"}]},
            ],
        }));
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let report = Splitter::new(&fs, &map, "/out").split(&doc).unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(fs.json("/out/post.collection.json")["item"], json!([{"name": "second"}]));
    }

    #[test]
    fn missing_schema_fails_only_for_matched_modules() {
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let unmatched = source(&json!({"item": [{"name": "Unknown"}]}));
        assert!(Splitter::new(&fs, &map, "/out").split(&unmatched).is_ok());

        let matched = source(&json!({"item": [{"name": "Auth"}]}));
        let err = Splitter::new(&fs, &map, "/out").split(&matched).unwrap_err();
        assert!(matches!(err, SplitError::MissingSchema { ref module } if module == "Auth"));
    }

    #[test]
    fn null_schema_and_variable_are_copied_through() {
        let fs = MemoryFileSystem::with_file(
            "src.json",
            r#"{"info": {"schema": null}, "variable": null, "item": [{"name": "Auth", "item": []}]}"#,
        );
        let map = ModuleMap::default();

        let doc = load(&fs, Path::new("src.json")).unwrap();
        Splitter::new(&fs, &map, "/out").split(&doc).unwrap();

        assert_eq!(
            fs.json("/out/auth.collection.json"),
            json!({
                "info": {"name": "Auth API", "description": "Auth endpoints", "schema": null},
                "variable": null,
                "item": [],
            })
        );
    }

    #[test]
    fn non_object_info_is_fatal_only_for_matched_modules() {
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let unmatched = source(&json!({"info": "legacy", "item": [{"name": "Unknown"}]}));
        assert!(Splitter::new(&fs, &map, "/out").split(&unmatched).is_ok());

        let matched = source(&json!({"info": "legacy", "item": [{"name": "Chat"}]}));
        let err = Splitter::new(&fs, &map, "/out").split(&matched).unwrap_err();
        assert!(matches!(err, SplitError::MissingSchema { ref module } if module == "Chat"));
    }

    #[test]
    fn write_failure_stops_after_earlier_files() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "item": [{"name": "Auth"}, {"name": "Chat"}, {"name": "Admin"}],
        }));
        let fs = MemoryFileSystem {
            read_only: vec![PathBuf::from("/out/chat.collection.json")],
            ..MemoryFileSystem::default()
        };
        let map = ModuleMap::default();

        let err = Splitter::new(&fs, &map, "/out").split(&doc).unwrap_err();

        assert!(matches!(err, SplitError::Write { .. }));
        assert_eq!(*fs.writes.borrow(), vec![PathBuf::from("/out/auth.collection.json")]);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "item": [{"name": "Auth"}, {"name": "Comment"}],
        }));
        let fs = MemoryFileSystem::default();
        let map = ModuleMap::default();

        let report = Splitter::new(&fs, &map, "/out").dry_run(true).split(&doc).unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(fs.writes.borrow().is_empty());
    }

    #[test]
    fn split_is_byte_identical_across_runs() {
        let doc = source(&json!({
            "info": {"schema": SCHEMA},
            "variable": [{"key": "token", "value": "ключ"}],
            "item": [{"name": "Reaction", "item": [{"name": "Like", "z": 1, "a": 2}]}],
        }));
        let map = ModuleMap::default();

        let first = MemoryFileSystem::default();
        Splitter::new(&first, &map, "/out").split(&doc).unwrap();
        let second = MemoryFileSystem::default();
        Splitter::new(&second, &map, "/out").split(&doc).unwrap();

        assert_eq!(*first.files.borrow(), *second.files.borrow());
    }
}
