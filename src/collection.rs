//! Collection document types.
//!
//! The source collection is read into [`SourceDocument`]; each split module is
//! written out as an [`OutputDocument`] that borrows from it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

static NO_VARIABLES: Value = Value::Array(Vec::new());

/// The monolithic collection read from disk.
///
/// Only the fields the splitter needs are typed. Entries stay raw JSON so that
/// they are written back exactly as they were read, key order included.
/// A key that is present with a `null` value is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SourceDocument {
    /// Collection metadata, read only when a module matches.
    #[serde(default, deserialize_with = "present")]
    pub info: Option<Value>,
    /// Variables shared by every module.
    #[serde(default, deserialize_with = "present")]
    pub variable: Option<Value>,
    /// Top-level module entries, in file order.
    #[serde(default)]
    pub item: Vec<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SourceDocument {
    /// Parses a collection, keeping the last value of a repeated top-level key.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not JSON or not a collection object.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        serde_json::from_value(value)
    }

    /// Returns the shared `variable` value, or an empty sequence when the key
    /// is absent.
    #[must_use]
    pub fn shared_variables(&self) -> &Value {
        self.variable.as_ref().unwrap_or(&NO_VARIABLES)
    }

    /// Returns `info.schema` if the source has that key, whatever its value.
    #[must_use]
    pub fn schema(&self) -> Option<&Value> {
        self.info.as_ref().and_then(|info| info.get("schema"))
    }
}

/// Returns the `name` of a module entry if it is a string.
#[must_use]
pub fn entry_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

/// A per-module collection ready to be serialized.
#[derive(Debug, Serialize)]
pub struct OutputDocument<'a> {
    /// Generated metadata.
    pub info: OutputInfo<'a>,
    /// Shared variables, borrowed from the source.
    pub variable: &'a Value,
    /// Requests belonging to the module.
    pub item: Items<'a>,
}

/// Metadata block of an [`OutputDocument`].
#[derive(Debug, Serialize)]
pub struct OutputInfo<'a> {
    /// `"<module> API"`.
    pub name: String,
    /// `"<module> endpoints"`.
    pub description: String,
    /// Copied from the source collection.
    pub schema: &'a Value,
}

/// The `item` field of an [`OutputDocument`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Items<'a> {
    /// The entry's own nested `item` value, verbatim.
    Nested(&'a Value),
    /// A leaf entry wrapped as the sole request.
    Single([&'a Value; 1]),
}

impl<'a> OutputDocument<'a> {
    /// Builds the output document for `module` from one source entry.
    #[must_use]
    pub fn for_module(
        module: &str,
        entry: &'a Value,
        schema: &'a Value,
        variable: &'a Value,
    ) -> Self {
        let item = match entry.get("item") {
            Some(nested) => Items::Nested(nested),
            None => Items::Single([entry]),
        };
        Self {
            info: OutputInfo {
                name: format!("{module} API"),
                description: format!("{module} endpoints"),
                schema,
            },
            variable,
            item,
        }
    }

    /// Serializes the document as 2-space indented JSON.
    ///
    /// Non-ASCII characters are written literally.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
