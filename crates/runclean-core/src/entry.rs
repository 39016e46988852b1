//! History entries parsed from the Run dialog's MRU key.

use serde::Serialize;

/// Name of the metadata value that records recency order.
///
/// It lives alongside the history values but is not itself a command.
pub const MRU_INDEX: &str = "MRUList";

/// Suffix Windows appends to every stored command (a literal `\` then `1`).
pub const TRAILING_MARKER: &str = "\\1";

/// One command from the Run dialog history.
///
/// `name` is the registry value name (`a`, `b`, ...) and is only used as a
/// handle for deletion. `command` is what the user typed, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub name: String,
    pub command: String,
}

impl HistoryEntry {
    /// Builds an entry from a raw registry value.
    ///
    /// Returns `None` for the MRU index value.
    pub fn from_value(name: &str, data: &str) -> Option<Self> {
        if is_mru_index(name) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            command: strip_marker(data).to_string(),
        })
    }
}

/// Returns whether `name` is the metadata index rather than a command.
///
/// Registry value names are case-insensitive, so the comparison is too.
pub fn is_mru_index(name: &str) -> bool {
    name.eq_ignore_ascii_case(MRU_INDEX)
}

/// Removes the trailing `\1` marker, and only that exact suffix.
///
/// A command that merely ends in `1` (an IP address, a file name) is
/// returned unchanged.
pub fn strip_marker(data: &str) -> &str {
    data.strip_suffix(TRAILING_MARKER).unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_marker() {
        // Act / Assert
        assert_eq!(strip_marker("notepad\\1"), "notepad");
        assert_eq!(strip_marker("cmd /k dir C:\\\\1"), "cmd /k dir C:\\");
    }

    #[test]
    fn keeps_value_ending_in_plain_digit() {
        // Act / Assert
        assert_eq!(strip_marker("ping 10.0.0.1"), "ping 10.0.0.1");
        assert_eq!(strip_marker("file1"), "file1");
        assert_eq!(strip_marker("1"), "1");
    }

    #[test]
    fn strips_marker_only_once() {
        // Act / Assert
        assert_eq!(strip_marker("a\\1\\1"), "a\\1");
    }

    #[test]
    fn keeps_value_without_marker() {
        // Act / Assert
        assert_eq!(strip_marker("regedit"), "regedit");
        assert_eq!(strip_marker(""), "");
        assert_eq!(strip_marker("\\"), "\\");
    }

    #[test]
    fn mru_index_is_not_an_entry() {
        // Act
        let entry = HistoryEntry::from_value("MRUList", "cba");

        // Assert
        assert!(entry.is_none());
    }

    #[test]
    fn value_becomes_entry_with_clean_command() {
        // Act
        let entry = HistoryEntry::from_value("a", "services.msc\\1");

        // Assert
        assert_eq!(
            entry,
            Some(HistoryEntry {
                name: "a".into(),
                command: "services.msc".into(),
            })
        );
    }

    #[test]
    fn index_match_ignores_case() {
        // Act / Assert
        assert!(is_mru_index("MRUList"));
        assert!(is_mru_index("mrulist"));
        assert!(!is_mru_index("MRUListEx"));
        assert!(!is_mru_index("a"));
    }
}
