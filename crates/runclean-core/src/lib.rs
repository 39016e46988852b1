pub mod config;
pub mod entry;
pub mod history;
pub mod log;
pub mod selection;
pub mod store;

pub use config::Config;
pub use entry::HistoryEntry;
pub use history::{DeleteOutcome, HistoryList};
pub use selection::Selection;
pub use store::{HistoryStore, MemoryStore, RawValue, StoreResult, load_entries};
