//! Storage seam between the history list and the registry.
//!
//! The Windows crate implements [`HistoryStore`] on top of the real
//! `RunMRU` key. [`MemoryStore`] is an in-process stand-in with failure
//! injection, used by the tests and by anything that needs a store without
//! touching the registry.

use std::fmt;

use crate::entry::HistoryEntry;
use crate::log_debug;

/// A boxed error type for store operations.
pub type StoreResult<T> = Result<T, Box<dyn std::error::Error>>;

/// A named string value as read from the store, before any cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub name: String,
    pub data: String,
}

impl RawValue {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Narrow access to the history key: read everything, delete some.
pub trait HistoryStore {
    /// Returns every string value under the key in enumeration order.
    ///
    /// The MRU index is included; filtering happens in [`load_entries`].
    fn read_values(&self) -> StoreResult<Vec<RawValue>>;

    /// Deletes the named values in order.
    ///
    /// Stops at the first failure and returns it. Values deleted before
    /// the failure stay deleted.
    fn delete_values(&mut self, names: &[String]) -> StoreResult<()>;
}

/// Reads the store and turns its values into display entries.
///
/// The MRU index is dropped and the trailing marker stripped. Any read
/// error produces an empty list: a missing or unreadable key simply means
/// there is no history to show.
pub fn load_entries(store: &impl HistoryStore) -> Vec<HistoryEntry> {
    match store.read_values() {
        Ok(values) => values
            .iter()
            .filter_map(|v| HistoryEntry::from_value(&v.name, &v.data))
            .collect(),
        Err(e) => {
            log_debug!("history read failed, showing empty list: {e}");
            Vec::new()
        }
    }
}

/// Error returned by [`MemoryStore`] when a failure has been injected.
#[derive(Debug)]
pub struct InjectedError(String);

impl fmt::Display for InjectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InjectedError {}

/// An in-memory [`HistoryStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Vec<RawValue>,
    unreadable: bool,
    fail_on_delete: Option<String>,
    delete_calls: usize,
}

impl MemoryStore {
    /// Creates a store holding `(name, data)` pairs in the given order.
    pub fn new<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(name, data)| RawValue::new(name, data))
                .collect(),
            ..Default::default()
        }
    }

    /// Makes every read fail, as if the key were missing.
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// Makes deletion of `name` fail. Earlier names in the same call are
    /// still removed.
    pub fn fail_on_delete(mut self, name: impl Into<String>) -> Self {
        self.fail_on_delete = Some(name.into());
        self
    }

    /// Names currently stored, in order.
    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.name.as_str()).collect()
    }

    /// Number of `delete_values` calls received.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls
    }
}

impl HistoryStore for MemoryStore {
    fn read_values(&self) -> StoreResult<Vec<RawValue>> {
        if self.unreadable {
            return Err(Box::new(InjectedError(
                "The system cannot find the file specified.".into(),
            )));
        }
        Ok(self.values.clone())
    }

    fn delete_values(&mut self, names: &[String]) -> StoreResult<()> {
        self.delete_calls += 1;
        for name in names {
            if self.fail_on_delete.as_deref() == Some(name.as_str()) {
                return Err(Box::new(InjectedError(format!(
                    "could not delete value '{name}': Access is denied."
                ))));
            }
            let Some(pos) = self.values.iter().position(|v| &v.name == name) else {
                return Err(Box::new(InjectedError(format!(
                    "could not delete value '{name}': The system cannot find the file specified."
                ))));
            };
            self.values.remove(pos);
        }
        Ok(())
    }
}
