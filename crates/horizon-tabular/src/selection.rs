//! Row selection state for tables.
//!
//! The host application's list screens carry a reserved "Sélection" column
//! of per-row checkboxes with a page-level select-all. [`RowSelection`]
//! models that state by row position within the working collection.
//!
//! Positions dangle as soon as the working collection is replaced or
//! reordered, so the owning controller clears the selection on every such
//! change rather than trying to remap it.
//!
//! # Example
//!
//! ```
//! use horizon_tabular::RowSelection;
//!
//! let mut selection = RowSelection::new();
//! selection.toggle(2);
//! selection.toggle(0);
//!
//! assert!(selection.is_selected(2));
//! assert_eq!(selection.selected_rows(), vec![0, 2]);
//! ```

use std::collections::BTreeSet;

use horizon_tabular_core::Signal;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No rows can be selected.
    NoSelection,
    /// Only one row can be selected at a time.
    SingleSelection,
    /// Any number of rows can be selected (default; the selection column
    /// renders one checkbox per row).
    #[default]
    MultiSelection,
}

/// Row selection state, tracked by position in the working collection.
///
/// # Signals
///
/// - `selection_changed`: Emitted when selection changes, with the rows
///   that became (selected, deselected)
pub struct RowSelection {
    mode: SelectionMode,
    selected: BTreeSet<usize>,

    /// Emitted when selection changes. Args: (selected, deselected)
    pub selection_changed: Signal<(Vec<usize>, Vec<usize>)>,
}

impl Default for RowSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSelection {
    /// Create an empty multi-selection.
    pub fn new() -> Self {
        Self::with_mode(SelectionMode::default())
    }

    /// Create an empty selection with an explicit mode.
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
            selection_changed: Signal::new(),
        }
    }

    /// The current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode.
    ///
    /// Narrowing trims the current selection: `NoSelection` clears it, and
    /// `SingleSelection` keeps only the lowest selected row.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        let trimmed: Vec<usize> = match mode {
            SelectionMode::NoSelection => std::mem::take(&mut self.selected).into_iter().collect(),
            SelectionMode::SingleSelection if self.selected.len() > 1 => {
                let keep = *self.selected.iter().next().unwrap_or(&0);
                let trimmed = self.selected.split_off(&(keep + 1));
                trimmed.into_iter().collect()
            }
            _ => Vec::new(),
        };
        if !trimmed.is_empty() {
            self.selection_changed.emit((Vec::new(), trimmed));
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether a row is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Whether any row is selected.
    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Select a row.
    ///
    /// In `SingleSelection` mode any previous selection is replaced; in
    /// `NoSelection` mode the call is ignored.
    pub fn select(&mut self, row: usize) {
        match self.mode {
            SelectionMode::NoSelection => {}
            SelectionMode::SingleSelection => {
                if self.is_selected(row) {
                    return;
                }
                let deselected: Vec<usize> =
                    std::mem::take(&mut self.selected).into_iter().collect();
                self.selected.insert(row);
                self.selection_changed.emit((vec![row], deselected));
            }
            SelectionMode::MultiSelection => {
                if self.selected.insert(row) {
                    self.selection_changed.emit((vec![row], Vec::new()));
                }
            }
        }
    }

    /// Deselect a row.
    pub fn deselect(&mut self, row: usize) {
        if self.selected.remove(&row) {
            self.selection_changed.emit((Vec::new(), vec![row]));
        }
    }

    /// Toggle a row's selection state.
    pub fn toggle(&mut self, row: usize) {
        if self.is_selected(row) {
            self.deselect(row);
        } else {
            self.select(row);
        }
    }

    /// Select or deselect a batch of rows in one operation, emitting a
    /// single change. Used for the page-level select-all checkbox.
    ///
    /// Ignored outside `MultiSelection` mode.
    pub fn select_rows<I>(&mut self, rows: I, select: bool)
    where
        I: IntoIterator<Item = usize>,
    {
        if self.mode != SelectionMode::MultiSelection {
            tracing::debug!(
                target: "horizon_tabular::selection",
                "ignoring batch selection outside multi-selection mode"
            );
            return;
        }
        let mut changed = Vec::new();
        for row in rows {
            let did_change = if select {
                self.selected.insert(row)
            } else {
                self.selected.remove(&row)
            };
            if did_change {
                changed.push(row);
            }
        }
        if changed.is_empty() {
            return;
        }
        if select {
            self.selection_changed.emit((changed, Vec::new()));
        } else {
            self.selection_changed.emit((Vec::new(), changed));
        }
    }

    /// Select every row in `0..row_count`.
    ///
    /// Ignored outside `MultiSelection` mode.
    pub fn select_all(&mut self, row_count: usize) {
        self.select_rows(0..row_count, true);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let deselected: Vec<usize> = std::mem::take(&mut self.selected).into_iter().collect();
        self.selection_changed.emit((Vec::new(), deselected));
    }
}

impl std::fmt::Debug for RowSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSelection")
            .field("mode", &self.mode)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Changes = Arc<Mutex<Vec<(Vec<usize>, Vec<usize>)>>>;

    fn observed(selection: &RowSelection) -> Changes {
        let changes: Changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        selection
            .selection_changed
            .connect(move |change: &(Vec<usize>, Vec<usize>)| {
                changes_clone.lock().push(change.clone());
            });
        changes
    }

    #[test]
    fn test_toggle_and_queries() {
        let mut selection = RowSelection::new();
        assert!(!selection.has_selection());

        selection.toggle(3);
        selection.toggle(1);
        assert!(selection.is_selected(3));
        assert!(selection.is_selected(1));
        assert!(!selection.is_selected(2));
        assert_eq!(selection.selected_count(), 2);
        assert_eq!(selection.selected_rows(), vec![1, 3]);

        selection.toggle(3);
        assert!(!selection.is_selected(3));
        assert_eq!(selection.selected_rows(), vec![1]);
    }

    #[test]
    fn test_single_selection_replaces() {
        let mut selection = RowSelection::with_mode(SelectionMode::SingleSelection);
        let changes = observed(&selection);

        selection.select(2);
        selection.select(5);

        assert_eq!(selection.selected_rows(), vec![5]);
        assert_eq!(
            *changes.lock(),
            vec![(vec![2], vec![]), (vec![5], vec![2])]
        );
    }

    #[test]
    fn test_no_selection_mode_ignores() {
        let mut selection = RowSelection::with_mode(SelectionMode::NoSelection);
        let changes = observed(&selection);

        selection.select(0);
        selection.toggle(1);
        selection.select_all(10);

        assert!(!selection.has_selection());
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_batch_selection_emits_once() {
        let mut selection = RowSelection::new();
        selection.select(1); // already selected before the batch
        let changes = observed(&selection);

        selection.select_rows(0..4, true);
        assert_eq!(selection.selected_rows(), vec![0, 1, 2, 3]);
        // Row 1 was already selected, so the batch reports only the others
        assert_eq!(*changes.lock(), vec![(vec![0, 2, 3], vec![])]);

        selection.select_rows(0..4, false);
        assert!(!selection.has_selection());
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut selection = RowSelection::new();
        selection.select_all(3);
        assert_eq!(selection.selected_rows(), vec![0, 1, 2]);

        let changes = observed(&selection);
        selection.clear_selection();
        assert!(!selection.has_selection());
        assert_eq!(*changes.lock(), vec![(vec![], vec![0, 1, 2])]);

        // Clearing an empty selection is silent
        selection.clear_selection();
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_mode_narrowing_trims() {
        let mut selection = RowSelection::new();
        selection.select_all(4);

        selection.set_selection_mode(SelectionMode::SingleSelection);
        assert_eq!(selection.selected_rows(), vec![0]);

        selection.set_selection_mode(SelectionMode::NoSelection);
        assert!(!selection.has_selection());
    }
}
