//! Composition facade for list screens.
//!
//! [`TableController`] is the object a list screen instantiates. It owns the
//! base record collection together with a [`FilterModel`], a [`TableState`]
//! and a [`RowSelection`], and keeps the four consistent: every filter
//! mutation re-derives the working collection from the base, re-applies the
//! recorded sort, re-checks the page clamp and resets the selection.
//!
//! Derived values are recomputed from current inputs on every change rather
//! than incrementally patched, so the rendered order is a deterministic
//! function of (base records, filter state, sort key).
//!
//! # Example
//!
//! ```
//! use horizon_tabular::{Record, Schema, SortOrder, TableController, Value};
//!
//! let schema = Schema::from_pairs([
//!     ("Thème", "theme"),
//!     ("Statut", "status"),
//!     ("Actions", "actions"),
//! ]);
//! let mut controller = TableController::with_locale(schema, 10, "fr-FR").unwrap();
//!
//! controller.set_records(vec![
//!     Record::new().with("theme", "Sécurité").with("status", "Actif"),
//!     Record::new().with("theme", "Accueil").with("status", "Inactif"),
//!     Record::new().with("theme", "Budget").with("status", "Actif"),
//! ]);
//! controller.sort_by("Thème", SortOrder::Ascending).unwrap();
//!
//! // Keep only the active rows.
//! controller.set_filter_all("Statut", false);
//! controller.toggle_filter_value("Statut", Value::from("Actif"));
//!
//! let themes: Vec<String> = controller
//!     .page_slice()
//!     .iter()
//!     .map(|r| r.get_or_null("theme").to_string())
//!     .collect();
//! assert_eq!(themes, vec!["Budget", "Sécurité"]);
//! ```

use crate::error::Result;
use crate::filter::FilterModel;
use crate::record::Record;
use crate::schema::Schema;
use crate::selection::RowSelection;
use crate::sort::SortOrder;
use crate::state::TableState;
use crate::value::Value;

/// Facade tying a base collection to its filter, table state and selection.
///
/// The base collection is what the host loaded; the working collection (held
/// by the inner [`TableState`]) is the base narrowed through the filter and
/// ordered by the recorded sort. All row positions, for pagination and
/// selection alike, refer to the working collection.
#[derive(Debug)]
pub struct TableController {
    base: Vec<Record>,
    filter: FilterModel,
    table: TableState,
    selection: RowSelection,
}

impl TableController {
    /// Create a controller for a schema, using the system locale.
    ///
    /// Fails with [`Error::InvalidPageSize`](crate::Error::InvalidPageSize)
    /// when `page_size` is zero.
    pub fn new(schema: Schema, page_size: usize) -> Result<Self> {
        let table = TableState::new(schema.clone(), page_size)?;
        Ok(Self {
            base: Vec::new(),
            filter: FilterModel::new(schema),
            table,
            selection: RowSelection::new(),
        })
    }

    /// Create a controller with an explicit locale for sorting and
    /// distinct-value ordering.
    pub fn with_locale(schema: Schema, page_size: usize, locale: &str) -> Result<Self> {
        let table = TableState::builder(schema.clone())
            .page_size(page_size)
            .locale(locale)
            .build()?;
        Ok(Self {
            base: Vec::new(),
            filter: FilterModel::with_locale(schema, locale),
            table,
            selection: RowSelection::new(),
        })
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Replace the base collection.
    ///
    /// Recomputes the distinct-value lists, re-derives the working
    /// collection through the current filter state and recorded sort,
    /// re-checks the page clamp and resets the selection. Filter state
    /// persists across data refreshes.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.base = records;
        self.filter.set_records(&self.base);
        self.refresh();
    }

    /// The base collection as loaded, before filtering.
    pub fn base_records(&self) -> &[Record] {
        &self.base
    }

    /// Re-derive the working collection from the base.
    ///
    /// Signal order: the inner table emits `model_reset` (and `page_changed`
    /// if the clamp moved the counter), then `layout_changed` if a sort was
    /// re-applied, then the selection reports its reset.
    fn refresh(&mut self) {
        let working = self.filter.apply(&self.base);
        let sort = self
            .table
            .sort_key()
            .map(|(header, order)| (header.to_string(), order));
        self.table.set_records(working);
        if let Some((header, order)) = sort {
            if self.table.sort_by(&header, order).is_err() {
                tracing::warn!(
                    target: "horizon_tabular::controller",
                    header,
                    "recorded sort key no longer resolves"
                );
            }
        }
        // Row positions dangle once the working collection is reshaped.
        self.selection.clear_selection();
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Flip membership of `value` in the accepted-set for `header`, then
    /// re-derive the working collection.
    pub fn toggle_filter_value(&mut self, header: &str, value: Value) {
        self.filter.toggle_value(header, value);
        self.refresh();
    }

    /// Accept all (or none) of a header's distinct values, then re-derive
    /// the working collection.
    pub fn set_filter_all(&mut self, header: &str, select: bool) {
        self.filter.select_all(header, select);
        self.refresh();
    }

    /// Drop all filter state, restoring the working collection to the full
    /// base (in recorded sort order).
    pub fn clear_filters(&mut self) {
        self.filter.clear_all();
        self.refresh();
    }

    /// The distinct values for a header, collation-sorted.
    pub fn distinct_values(&self, header: &str) -> &[Value] {
        self.filter.distinct_values(header)
    }

    /// Whether a value is currently accepted for `header`.
    pub fn is_filter_selected(&self, header: &str, value: &Value) -> bool {
        self.filter.is_selected(header, value)
    }

    /// Whether `header` currently narrows the working collection.
    pub fn has_active_filter(&self, header: &str) -> bool {
        self.filter.has_active_filter(header)
    }

    /// Headers with an active filter, in header order.
    pub fn active_filter_headers(&self) -> Vec<&str> {
        self.filter.active_headers()
    }

    // ========================================================================
    // Sort / pagination / visibility
    // ========================================================================

    /// Sort the working collection by the column labelled `header`.
    ///
    /// The selection is reset: positions refer to the working collection
    /// and a reorder invalidates them.
    pub fn sort_by(&mut self, header: &str, order: SortOrder) -> Result<()> {
        self.table.sort_by(header, order)?;
        self.selection.clear_selection();
        Ok(())
    }

    /// The recorded sort, if any.
    pub fn sort_key(&self) -> Option<(&str, SortOrder)> {
        self.table.sort_key()
    }

    /// Move to page `page` (1-based), bounded to the valid range.
    pub fn set_current_page(&mut self, page: usize) {
        self.table.set_current_page(page);
    }

    /// Change the page size, re-checking the clamp invariant.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.table.set_page_size(page_size)
    }

    /// Show or hide the column labelled `header`.
    pub fn toggle_column_visibility(&mut self, header: &str) {
        self.table.toggle_column_visibility(header);
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// The working collection: base records narrowed through the filter,
    /// in recorded sort order.
    pub fn records(&self) -> &[Record] {
        self.table.records()
    }

    /// Records on the current page.
    pub fn page_slice(&self) -> &[Record] {
        self.table.page_slice()
    }

    /// Number of records in the working collection.
    pub fn total_records(&self) -> usize {
        self.table.total_records()
    }

    /// Number of pages implied by the working collection.
    pub fn total_pages(&self) -> usize {
        self.table.total_pages()
    }

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.table.current_page()
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.table.page_size()
    }

    /// Headers currently visible, in schema order.
    pub fn visible_headers(&self) -> Vec<&str> {
        self.table.visible_headers()
    }

    /// Whether the column labelled `header` is visible.
    pub fn is_column_visible(&self, header: &str) -> bool {
        self.table.is_column_visible(header)
    }

    /// Headers eligible for sorting (data columns only).
    pub fn sortable_headers(&self) -> Vec<&str> {
        self.table.sortable_headers()
    }

    /// The schema the controller was built for.
    pub fn schema(&self) -> &Schema {
        self.table.schema()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Toggle selection of a row in the working collection.
    ///
    /// Out-of-range positions are ignored.
    pub fn toggle_row_selection(&mut self, row: usize) {
        if row >= self.total_records() {
            tracing::debug!(
                target: "horizon_tabular::controller",
                row,
                total = self.total_records(),
                "ignoring selection toggle for out-of-range row"
            );
            return;
        }
        self.selection.toggle(row);
    }

    /// Select or deselect every row on the current page.
    pub fn select_page(&mut self, select: bool) {
        let start = (self.current_page() - 1) * self.page_size();
        let len = self.page_slice().len();
        self.selection.select_rows(start..start + len, select);
    }

    /// Select every row in the working collection.
    pub fn select_all_rows(&mut self) {
        self.selection.select_all(self.total_records());
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    /// Whether a row of the working collection is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selection.is_selected(row)
    }

    /// Selected rows in ascending order.
    pub fn selected_rows(&self) -> Vec<usize> {
        self.selection.selected_rows()
    }

    /// The selected records themselves, in working-collection order.
    pub fn selected_records(&self) -> Vec<&Record> {
        let records = self.table.records();
        self.selection
            .selected_rows()
            .into_iter()
            .filter_map(|row| records.get(row))
            .collect()
    }

    // ========================================================================
    // Constituents (signal hookup)
    // ========================================================================

    /// The inner table state, for connecting to its signals.
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// The inner filter engine, for connecting to its signals.
    pub fn filter(&self) -> &FilterModel {
        &self.filter
    }

    /// The inner selection model, for connecting to its signals.
    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_schema() -> Schema {
        Schema::from_pairs([
            ("Thème", "theme"),
            ("Statut", "status"),
            ("Actions", "actions"),
        ])
    }

    fn training_records() -> Vec<Record> {
        vec![
            Record::new().with("theme", "Sécurité").with("status", "Actif"),
            Record::new().with("theme", "Accueil").with("status", "Inactif"),
            Record::new().with("theme", "Budget").with("status", "Actif"),
            Record::new().with("theme", "Éthique").with("status", "Actif"),
            Record::new().with("theme", "Conformité").with("status", "Inactif"),
        ]
    }

    fn controller() -> TableController {
        let mut controller = TableController::with_locale(training_schema(), 2, "fr-FR").unwrap();
        controller.set_records(training_records());
        controller
    }

    fn themes(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get_or_null("theme").to_string())
            .collect()
    }

    #[test]
    fn test_set_records_populates_everything() {
        let controller = controller();
        assert_eq!(controller.total_records(), 5);
        assert_eq!(controller.total_pages(), 3);
        assert_eq!(controller.distinct_values("Statut").len(), 2);
        assert_eq!(controller.base_records().len(), 5);
    }

    #[test]
    fn test_filter_narrows_and_reclamps() {
        let mut controller = controller();
        controller.set_current_page(3);

        // Keep only inactive rows: 2 records, 1 page.
        controller.set_filter_all("Statut", false);
        controller.toggle_filter_value("Statut", Value::from("Inactif"));

        assert_eq!(controller.total_records(), 2);
        assert_eq!(controller.current_page(), 1);
        assert_eq!(
            themes(controller.records()),
            vec!["Accueil", "Conformité"]
        );
    }

    #[test]
    fn test_sort_survives_filter_changes() {
        let mut controller = controller();
        controller.sort_by("Thème", SortOrder::Ascending).unwrap();
        assert_eq!(
            themes(controller.records()),
            vec!["Accueil", "Budget", "Conformité", "Éthique", "Sécurité"]
        );

        controller.set_filter_all("Statut", false);
        controller.toggle_filter_value("Statut", Value::from("Actif"));

        // The working collection is re-filtered and the recorded sort
        // re-applied, so order stays collation-ascending.
        assert_eq!(
            themes(controller.records()),
            vec!["Budget", "Éthique", "Sécurité"]
        );
        assert_eq!(
            controller.sort_key(),
            Some(("Thème", SortOrder::Ascending))
        );
    }

    #[test]
    fn test_sort_survives_data_refresh() {
        let mut controller = controller();
        controller.sort_by("Thème", SortOrder::Descending).unwrap();

        let mut refreshed = training_records();
        refreshed.push(Record::new().with("theme", "Droit").with("status", "Actif"));
        controller.set_records(refreshed);

        assert_eq!(
            themes(controller.records()),
            vec![
                "Sécurité",
                "Éthique",
                "Droit",
                "Conformité",
                "Budget",
                "Accueil"
            ]
        );
    }

    #[test]
    fn test_reshape_resets_selection() {
        let mut controller = controller();
        controller.toggle_row_selection(0);
        controller.toggle_row_selection(1);
        assert_eq!(controller.selected_rows(), vec![0, 1]);

        controller.toggle_filter_value("Statut", Value::from("Actif"));
        assert!(!controller.selection().has_selection());

        controller.toggle_row_selection(0);
        controller.sort_by("Thème", SortOrder::Ascending).unwrap();
        assert!(!controller.selection().has_selection());
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut controller = controller();
        controller.toggle_row_selection(99);
        assert!(!controller.selection().has_selection());
    }

    #[test]
    fn test_select_page_covers_current_page_only() {
        let mut controller = controller();
        controller.set_current_page(2);
        controller.select_page(true);
        assert_eq!(controller.selected_rows(), vec![2, 3]);

        // Last page holds the one leftover record.
        controller.set_current_page(3);
        controller.select_page(true);
        assert_eq!(controller.selected_rows(), vec![2, 3, 4]);

        controller.select_page(false);
        assert_eq!(controller.selected_rows(), vec![2, 3]);
    }

    #[test]
    fn test_selected_records_follow_working_order() {
        let mut controller = controller();
        controller.sort_by("Thème", SortOrder::Ascending).unwrap();
        controller.toggle_row_selection(0);
        controller.toggle_row_selection(4);

        let selected = controller.selected_records();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].get_or_null("theme").to_string(), "Accueil");
        assert_eq!(selected[1].get_or_null("theme").to_string(), "Sécurité");
    }

    #[test]
    fn test_clear_filters_restores_base() {
        let mut controller = controller();
        controller.set_filter_all("Statut", false);
        assert_eq!(controller.total_records(), 0);
        assert_eq!(controller.total_pages(), 0);
        assert_eq!(controller.current_page(), 1);

        controller.clear_filters();
        assert_eq!(controller.total_records(), 5);
        assert_eq!(controller.total_pages(), 3);
    }

    #[test]
    fn test_page_select_all_then_collect() {
        let mut controller = controller();
        controller.sort_by("Thème", SortOrder::Ascending).unwrap();
        controller.select_page(true);

        let selected = controller.selected_records();
        assert_eq!(
            selected
                .iter()
                .map(|r| r.get_or_null("theme").to_string())
                .collect::<Vec<_>>(),
            vec!["Accueil", "Budget"]
        );
    }
}
