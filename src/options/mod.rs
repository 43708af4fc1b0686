//! # Common-Options Store
//!
//! Cross-type default field values (styling and embedding options) that
//! persist between sessions, independently of any per-type form. Saved on
//! every change, restored once at form initialization.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::FaroError;
use crate::schema;

/// Field values shared across all content types.
pub type CommonOptions = BTreeMap<String, String>;

/// Fixed key the serialized option set lives under.
const STORAGE_KEY: &str = "qr_common_options";

/// Persists the common-option set through a [`KeyValueStore`].
#[derive(Debug)]
pub struct OptionsStore<S> {
    store: S,
}

impl<S: KeyValueStore> OptionsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialize and write the full option set, overwriting whatever was
    /// stored before. File-kind fields are filtered out and never written.
    pub fn save(&mut self, options: &CommonOptions) -> Result<(), FaroError> {
        let persistable: CommonOptions = options
            .iter()
            .filter(|(name, _)| !is_file_field(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let text =
            serde_json::to_string(&persistable).map_err(|e| FaroError::Store(e.to_string()))?;
        self.store.set(STORAGE_KEY, &text)
    }

    /// Read the persisted option set. An absent key or unparseable value
    /// loads as an empty set; neither is an error for the caller.
    pub fn load(&self) -> CommonOptions {
        let Some(text) = self.store.get(STORAGE_KEY) else {
            return CommonOptions::new();
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("ignoring unparseable stored options: {e}");
            CommonOptions::new()
        })
    }

    /// Apply persisted values onto the current form state. Only fields
    /// that exist in the common-option schema and are not file-kind are
    /// applied; anything else is silently skipped.
    pub fn restore(&self, into: &mut CommonOptions) {
        let fields = schema::common_fields();
        for (name, value) in self.load() {
            match fields.iter().find(|f| f.name == name) {
                Some(field) if !field.kind.is_file() => {
                    into.insert(name, value);
                }
                _ => {}
            }
        }
    }
}

fn is_file_field(name: &str) -> bool {
    schema::common_fields()
        .iter()
        .any(|f| f.name == name && f.kind.is_file())
}
