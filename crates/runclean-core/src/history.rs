//! The history list shown in the window: entries, their checkboxes, and
//! the delete flow.

use crate::entry::HistoryEntry;
use crate::selection::Selection;
use crate::store::{HistoryStore, load_entries};
use crate::{log_info, log_warn};

/// Warning shown when delete is pressed with nothing ticked.
pub const NOTHING_SELECTED_MESSAGE: &str = "Please select at least one item to delete.";

/// Confirmation shown after a successful delete.
pub const DELETED_MESSAGE: &str = "Selected items have been removed from history.";

/// Question asked before deleting `count` entries.
pub fn confirm_message(count: usize) -> String {
    format!("Are you sure you want to delete {count} items?")
}

/// What happened when the user asked to delete the checked entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing was ticked. No confirmation asked, no write made.
    NothingSelected,
    /// The user declined the confirmation.
    Cancelled,
    /// Every checked entry was removed.
    Deleted(usize),
    /// The store failed part way. Earlier deletions were kept.
    Failed(String),
}

impl DeleteOutcome {
    /// Text for the dialog shown to the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NothingSelected => Some(NOTHING_SELECTED_MESSAGE.to_string()),
            Self::Cancelled => None,
            Self::Deleted(_) => Some(DELETED_MESSAGE.to_string()),
            Self::Failed(e) => Some(format!("Failed to delete items: {e}")),
        }
    }
}

/// Entries read from a [`HistoryStore`] plus their checkbox state.
///
/// The entry list is never patched: every read replaces it wholesale so
/// the view always matches what the store holds.
pub struct HistoryList<S> {
    store: S,
    entries: Vec<HistoryEntry>,
    selection: Selection,
}

impl<S: HistoryStore> HistoryList<S> {
    /// Wraps `store` without reading it yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
            selection: Selection::default(),
        }
    }

    /// Re-reads the store, discarding the previous entries and ticks.
    pub fn reload(&mut self) {
        self.entries = load_entries(&self.store);
        self.selection.reset(self.entries.len());
        log_info!("loaded {} history entries", self.entries.len());
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a click on the checkbox at `index`.
    pub fn set_checked(&mut self, index: usize, checked: bool) {
        self.selection.set_checked(index, checked);
    }

    /// Applies the select-all toggle. Returns the state applied.
    pub fn toggle_all(&mut self) -> bool {
        self.selection.toggle_all()
    }

    /// Names of the checked entries, in display order.
    pub fn checked_names(&self) -> Vec<String> {
        self.selection
            .checked_indices()
            .filter_map(|i| self.entries.get(i))
            .map(|e| e.name.clone())
            .collect()
    }

    /// Deletes the checked entries after asking `confirm`.
    ///
    /// `confirm` receives the number of entries about to be removed and
    /// returns whether to proceed. It is not called when nothing is
    /// checked. After any write attempt the list is re-read, including on
    /// failure, so entries removed before the error disappear from view.
    pub fn delete_checked(&mut self, confirm: impl FnOnce(usize) -> bool) -> DeleteOutcome {
        let names = self.checked_names();
        if names.is_empty() {
            return DeleteOutcome::NothingSelected;
        }
        if !confirm(names.len()) {
            return DeleteOutcome::Cancelled;
        }

        let outcome = match self.store.delete_values(&names) {
            Ok(()) => {
                log_info!("deleted {} history entries", names.len());
                DeleteOutcome::Deleted(names.len())
            }
            Err(e) => {
                log_warn!("delete failed: {e}");
                DeleteOutcome::Failed(e.to_string())
            }
        };
        self.reload();
        outcome
    }
}
