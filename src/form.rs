//! Form state for the active content type.

use std::collections::BTreeMap;

use crate::error::FaroError;
use crate::schema::{self, QrType};

/// Field values for the currently selected content type.
///
/// Created empty when a type is selected and discarded wholesale on type
/// switch. Values never migrate from one type's form to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Check that every required field of `ty` carries a non-blank value.
///
/// Runs before normalization and dispatch; the first offending field is
/// reported so it can be surfaced inline.
pub fn validate(ty: QrType, values: &FormValues) -> Result<(), FaroError> {
    for field in schema::fields(ty) {
        if !field.required {
            continue;
        }
        let blank = values
            .get(field.name)
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        if blank {
            return Err(FaroError::Validation {
                field: field.name.to_string(),
                message: format!("{} is required", field.label),
            });
        }
    }
    Ok(())
}
