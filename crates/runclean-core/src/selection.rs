/// Label shown on the toggle button when its next click selects everything.
pub const SELECT_ALL_LABEL: &str = "Select All";

/// Label shown on the toggle button when its next click clears everything.
pub const DESELECT_ALL_LABEL: &str = "Deselect All";

/// Checkbox state for the currently displayed entries.
///
/// The select-all toggle remembers what it last applied and flips that,
/// regardless of what the individual boxes currently show. Clicking
/// "Select All", unticking one item, then clicking again therefore clears
/// every item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: Vec<bool>,
    all_selected: bool,
}

impl Selection {
    /// Creates a selection of `len` unchecked items.
    pub fn new(len: usize) -> Self {
        Self {
            checked: vec![false; len],
            all_selected: false,
        }
    }

    /// Replaces the items with `len` unchecked ones.
    ///
    /// The toggle's remembered state is kept, so its label does not jump
    /// when the list is refreshed.
    pub fn reset(&mut self, len: usize) {
        self.checked = vec![false; len];
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.checked.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Flips the remembered state and applies it to every item.
    ///
    /// Returns the state that was applied.
    pub fn toggle_all(&mut self) -> bool {
        self.all_selected = !self.all_selected;
        self.checked.fill(self.all_selected);
        self.all_selected
    }

    /// Label for the toggle button: what the *next* click will do.
    pub fn toggle_label(&self) -> &'static str {
        if self.all_selected {
            DESELECT_ALL_LABEL
        } else {
            SELECT_ALL_LABEL
        }
    }

    /// Records a single checkbox change. Out-of-range indices are ignored.
    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if let Some(slot) = self.checked.get_mut(index) {
            *slot = checked;
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Number of checked items.
    pub fn checked_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    /// Indices of checked items in display order.
    pub fn checked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.checked
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.then_some(i))
    }

    /// Per-item states in display order.
    pub fn states(&self) -> &[bool] {
        &self.checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_is_unchecked_with_select_label() {
        // Act
        let sel = Selection::new(3);

        // Assert
        assert_eq!(sel.checked_count(), 0);
        assert_eq!(sel.toggle_label(), SELECT_ALL_LABEL);
    }

    #[test]
    fn toggle_all_checks_everything_then_clears() {
        // Arrange
        let mut sel = Selection::new(4);

        // Act
        let first = sel.toggle_all();

        // Assert
        assert!(first);
        assert_eq!(sel.states(), [true; 4]);
        assert_eq!(sel.toggle_label(), DESELECT_ALL_LABEL);

        // Act
        let second = sel.toggle_all();

        // Assert
        assert!(!second);
        assert_eq!(sel.states(), [false; 4]);
        assert_eq!(sel.toggle_label(), SELECT_ALL_LABEL);
    }

    #[test]
    fn toggle_follows_remembered_state_not_items() {
        // Arrange
        let mut sel = Selection::new(3);
        sel.set_checked(0, true);
        sel.set_checked(1, true);
        sel.set_checked(2, true);

        // Act: everything is already ticked by hand, but the toggle has
        // never been used, so it selects rather than clears.
        sel.toggle_all();

        // Assert
        assert_eq!(sel.checked_count(), 3);
        assert_eq!(sel.toggle_label(), DESELECT_ALL_LABEL);

        // Arrange
        sel.set_checked(1, false);

        // Act
        sel.toggle_all();

        // Assert
        assert_eq!(sel.checked_count(), 0);
    }

    #[test]
    fn set_checked_ignores_out_of_range() {
        // Arrange
        let mut sel = Selection::new(2);

        // Act
        sel.set_checked(5, true);

        // Assert
        assert_eq!(sel.checked_count(), 0);
        assert!(!sel.is_checked(5));
    }

    #[test]
    fn checked_indices_are_in_order() {
        // Arrange
        let mut sel = Selection::new(5);
        sel.set_checked(3, true);
        sel.set_checked(1, true);

        // Act
        let indices: Vec<_> = sel.checked_indices().collect();

        // Assert
        assert_eq!(indices, [1, 3]);
    }

    #[test]
    fn reset_clears_items_but_keeps_toggle_state() {
        // Arrange
        let mut sel = Selection::new(2);
        sel.toggle_all();

        // Act
        sel.reset(3);

        // Assert
        assert_eq!(sel.len(), 3);
        assert_eq!(sel.checked_count(), 0);
        assert_eq!(sel.toggle_label(), DESELECT_ALL_LABEL);
    }
}
