use runclean_core::{HistoryEntry, load_entries};
use runclean_windows::RegistryStore;

/// Prints the Run dialog history without changing it.
///
/// Uses the same read path as the window, so an unreadable key prints an
/// empty list rather than an error.
pub fn execute(json: bool) {
    let entries = load_entries(&RegistryStore::run_mru());

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: could not encode entries: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render_table(&entries));
}

fn render_table(entries: &[HistoryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{:<4} {}\n", entry.name, entry.command));
    }
    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    out.push_str(&format!("{} {noun} found\n", entries.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_names_and_commands() {
        // Arrange
        let entries = vec![
            HistoryEntry {
                name: "a".into(),
                command: "cmd".into(),
            },
            HistoryEntry {
                name: "b".into(),
                command: "regedit".into(),
            },
        ];

        // Act
        let table = render_table(&entries);

        // Assert
        assert_eq!(table, "a    cmd\nb    regedit\n2 entries found\n");
    }

    #[test]
    fn empty_table_reports_zero() {
        // Act / Assert
        assert_eq!(render_table(&[]), "0 entries found\n");
    }
}
