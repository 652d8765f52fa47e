//! Pagination, sorting and column-visibility state for one table instance.
//!
//! [`TableState`] is the caller-owned state object behind a list screen: it
//! holds the working record collection, the 1-based page counter, the page
//! size, the visible-column set and the last requested sort. Each screen
//! owns its own instance; there is no shared or ambient state.
//!
//! The page counter obeys one standing invariant: it is always within
//! `[1, total_pages]` (`[1, 1]` when the collection is empty). Every
//! mutation that can shrink the record count or change the page size
//! re-checks the invariant explicitly, so an out-of-range, empty page is
//! never displayed.

use std::collections::HashSet;

use horizon_tabular_core::Signal;

use crate::collation::Collation;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::Schema;
use crate::sort::{self, SortOrder};

const DEFAULT_PAGE_SIZE: usize = 10;

/// Pagination / sort / column-visibility state for one table.
///
/// # Example
///
/// ```
/// use horizon_tabular::{Record, Schema, SortOrder, TableState};
///
/// let schema = Schema::from_pairs([("Thème", "theme"), ("Actions", "actions")]);
/// let mut table = TableState::builder(schema)
///     .page_size(2)
///     .locale("fr-FR")
///     .build()
///     .unwrap();
///
/// table.set_records(vec![
///     Record::new().with("theme", "C"),
///     Record::new().with("theme", "A"),
///     Record::new().with("theme", "B"),
/// ]);
/// table.sort_by("Thème", SortOrder::Ascending).unwrap();
///
/// assert_eq!(table.total_pages(), 2);
/// assert_eq!(table.page_slice().len(), 2);
/// assert_eq!(table.page_slice()[0].get_or_null("theme").to_string(), "A");
/// ```
pub struct TableState {
    schema: Schema,
    collation: Collation,
    rows: Vec<Record>,
    page_size: usize,
    current_page: usize,
    visible: HashSet<String>,
    sort: Option<(String, SortOrder)>,

    /// Emitted after the working collection is replaced.
    pub model_reset: Signal<()>,
    /// Emitted after the working collection is reordered in place.
    pub layout_changed: Signal<()>,
    /// Emitted with the new page whenever the page counter moves, whether
    /// by request or by the clamp invariant.
    pub page_changed: Signal<usize>,
    /// Emitted with the header whose visibility was toggled.
    pub column_visibility_changed: Signal<String>,
}

impl TableState {
    /// Create a state object with all columns visible and the system locale.
    ///
    /// Fails with [`Error::InvalidPageSize`] when `page_size` is zero.
    pub fn new(schema: Schema, page_size: usize) -> Result<Self> {
        TableStateBuilder::new(schema).page_size(page_size).build()
    }

    /// Start building a state object.
    pub fn builder(schema: Schema) -> TableStateBuilder {
        TableStateBuilder::new(schema)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Replace the working collection.
    ///
    /// Nothing else resets automatically: sort indicator, visible columns
    /// and the page counter persist, except that the page clamp invariant
    /// is re-checked (a shrink can move the counter back into range).
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.rows = records;
        let clamped = self.clamp_page();
        self.model_reset.emit(());
        if let Some(page) = clamped {
            self.page_changed.emit(page);
        }
    }

    /// Sort the working collection by the column labelled `header`.
    ///
    /// The header resolves to its record field through the schema; the
    /// collection is replaced by the sorted result and the current page is
    /// preserved. The (header, order) pair is recorded for introspection
    /// via [`TableState::sort_key`].
    ///
    /// Fails fast with [`Error::UnknownColumn`] for headers the schema does
    /// not define, and [`Error::NotSortable`] for the reserved synthetic
    /// headers.
    pub fn sort_by(&mut self, header: &str, order: SortOrder) -> Result<()> {
        if !self.schema.contains(header) {
            return Err(Error::unknown_column(header));
        }
        if Schema::is_reserved(header) {
            return Err(Error::not_sortable(header));
        }
        // contains() above guarantees resolution
        let key = match self.schema.key_for(header) {
            Some(key) => key.to_string(),
            None => return Err(Error::unknown_column(header)),
        };

        sort::sort_in_place(&mut self.rows, &key, order, &self.collation);
        self.sort = Some((header.to_string(), order));
        tracing::debug!(
            target: "horizon_tabular::state",
            header,
            order = order.as_str(),
            "collection sorted"
        );
        self.layout_changed.emit(());
        Ok(())
    }

    /// Move to page `page` (1-based), bounded to the valid range.
    ///
    /// Out-of-range requests self-correct to the nearest valid page rather
    /// than displaying an empty page.
    pub fn set_current_page(&mut self, page: usize) {
        let bounded = page.clamp(1, self.last_page());
        if bounded != page {
            tracing::debug!(
                target: "horizon_tabular::state",
                requested = page,
                bounded,
                "page request out of range"
            );
        }
        if bounded != self.current_page {
            self.current_page = bounded;
            self.page_changed.emit(bounded);
        }
    }

    /// Replace the page size, re-checking the page clamp invariant.
    ///
    /// Fails with [`Error::InvalidPageSize`] when `page_size` is zero.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::invalid_page_size(page_size));
        }
        self.page_size = page_size;
        if let Some(page) = self.clamp_page() {
            self.page_changed.emit(page);
        }
        Ok(())
    }

    /// Toggle a header in the visible-column set.
    ///
    /// Headers the schema does not define are ignored.
    pub fn toggle_column_visibility(&mut self, header: &str) {
        if !self.schema.contains(header) {
            tracing::debug!(
                target: "horizon_tabular::state",
                header,
                "ignoring visibility toggle for unknown column"
            );
            return;
        }
        if !self.visible.remove(header) {
            self.visible.insert(header.to_string());
        }
        self.column_visibility_changed.emit(header.to_string());
    }

    /// Re-check the page invariant; returns the corrected page if it moved.
    fn clamp_page(&mut self) -> Option<usize> {
        let last = self.last_page();
        if self.current_page > last {
            tracing::debug!(
                target: "horizon_tabular::state",
                from = self.current_page,
                to = last,
                "page clamped after shrink"
            );
            self.current_page = last;
            Some(last)
        } else {
            None
        }
    }

    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// The working collection, in current order.
    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    /// Number of records in the working collection.
    pub fn total_records(&self) -> usize {
        self.rows.len()
    }

    /// Number of pages implied by the record count and page size; zero for
    /// an empty collection.
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size)
    }

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Records shown on the current page.
    pub fn page_slice(&self) -> &[Record] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.rows.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The last requested sort, if any.
    pub fn sort_key(&self) -> Option<(&str, SortOrder)> {
        self.sort
            .as_ref()
            .map(|(header, order)| (header.as_str(), *order))
    }

    /// Headers currently visible, in schema order.
    pub fn visible_headers(&self) -> Vec<&str> {
        self.schema
            .headers()
            .filter(|header| self.visible.contains(*header))
            .collect()
    }

    /// Whether a header is currently visible.
    pub fn is_column_visible(&self, header: &str) -> bool {
        self.visible.contains(header)
    }

    /// Headers eligible for sorting (all headers minus the reserved ones).
    pub fn sortable_headers(&self) -> Vec<&str> {
        self.schema.sortable_headers()
    }

    /// The display schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl std::fmt::Debug for TableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableState")
            .field("rows", &self.rows.len())
            .field("page_size", &self.page_size)
            .field("current_page", &self.current_page)
            .field("sort", &self.sort)
            .field("visible", &self.visible_headers())
            .finish_non_exhaustive()
    }
}

/// Builder for [`TableState`].
///
/// Page size defaults to 10, visibility to every header in the schema, and
/// the locale to the system locale.
#[derive(Debug)]
pub struct TableStateBuilder {
    schema: Schema,
    page_size: usize,
    visible: Option<Vec<String>>,
    locale: Option<String>,
}

impl TableStateBuilder {
    /// Start a builder for the given schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            page_size: DEFAULT_PAGE_SIZE,
            visible: None,
            locale: None,
        }
    }

    /// Records per page (must be at least 1; checked at build).
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Narrow the initial visible-column set. Headers the schema does not
    /// define are dropped.
    pub fn visible_columns<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Override the collation locale (BCP 47 identifier).
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Build the state object.
    ///
    /// Fails with [`Error::InvalidPageSize`] when the page size is zero.
    pub fn build(self) -> Result<TableState> {
        if self.page_size == 0 {
            return Err(Error::invalid_page_size(self.page_size));
        }

        let collation = match &self.locale {
            Some(locale) => Collation::with_locale(locale),
            None => Collation::new(),
        };

        let visible: HashSet<String> = match self.visible {
            Some(headers) => headers
                .into_iter()
                .filter(|header| self.schema.contains(header))
                .collect(),
            None => self.schema.headers().map(str::to_string).collect(),
        };

        Ok(TableState {
            schema: self.schema,
            collation,
            rows: Vec::new(),
            page_size: self.page_size,
            current_page: 1,
            visible,
            sort: None,
            model_reset: Signal::new(),
            layout_changed: Signal::new(),
            page_changed: Signal::new(),
            column_visibility_changed: Signal::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn schema() -> Schema {
        Schema::from_pairs([
            ("Thème", "theme"),
            ("Statut", "status"),
            ("Actions", "actions"),
        ])
    }

    fn table(page_size: usize) -> TableState {
        TableState::builder(schema())
            .page_size(page_size)
            .locale("fr-FR")
            .build()
            .unwrap()
    }

    fn numbered(count: usize) -> Vec<Record> {
        (0..count)
            .map(|i| {
                Record::new()
                    .with("theme", format!("T{i:02}"))
                    .with("status", if i % 2 == 0 { "Actif" } else { "Inactif" })
            })
            .collect()
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        match TableState::new(schema(), 0) {
            Err(Error::InvalidPageSize { page_size }) => assert_eq!(page_size, 0),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("zero page size must be rejected"),
        }
    }

    #[test]
    fn test_page_math() {
        let mut table = table(2);
        table.set_records(numbered(5));

        assert_eq!(table.total_records(), 5);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(table.page_slice().len(), 2);

        table.set_current_page(3);
        assert_eq!(table.page_slice().len(), 1);
    }

    #[test]
    fn test_empty_collection_pages() {
        let table = table(4);
        assert_eq!(table.total_records(), 0);
        assert_eq!(table.total_pages(), 0);
        assert_eq!(table.current_page(), 1);
        assert!(table.page_slice().is_empty());
    }

    #[test]
    fn test_out_of_range_page_request_self_corrects() {
        let mut table = table(4);
        table.set_records(numbered(10)); // 3 pages

        table.set_current_page(5);
        assert_eq!(table.current_page(), 3);

        table.set_current_page(0);
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_clamp_on_shrink() {
        let mut table = table(4);
        table.set_records(numbered(10)); // 3 pages
        table.set_current_page(5); // clamps to 3

        let pages = Arc::new(Mutex::new(Vec::new()));
        let pages_clone = pages.clone();
        table.page_changed.connect(move |&page| {
            pages_clone.lock().push(page);
        });

        table.set_records(numbered(3)); // 1 page
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.page_slice().len(), 3);
        assert_eq!(*pages.lock(), vec![1]);
    }

    #[test]
    fn test_clamp_on_page_size_change() {
        let mut table = table(4);
        table.set_records(numbered(10));
        table.set_current_page(3);

        table.set_page_size(10).unwrap();
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.current_page(), 1);

        assert!(table.set_page_size(0).is_err());
        assert_eq!(table.page_size(), 10); // unchanged after rejection
    }

    #[test]
    fn test_set_records_resets_nothing_else() {
        let mut table = table(4);
        table.set_records(numbered(10));
        table.sort_by("Thème", SortOrder::Descending).unwrap();
        table.toggle_column_visibility("Statut");
        table.set_current_page(2);

        table.set_records(numbered(9)); // still 3 pages

        assert_eq!(table.current_page(), 2);
        assert_eq!(table.sort_key(), Some(("Thème", SortOrder::Descending)));
        assert!(!table.is_column_visible("Statut"));
        // The fresh collection arrives in caller order; sorting is not
        // re-applied implicitly.
        assert_eq!(table.records()[0].get_or_null("theme").to_string(), "T00");
    }

    #[test]
    fn test_sort_by_orders_and_preserves_page() {
        let mut table = table(2);
        table.set_records(vec![
            Record::new().with("theme", "C"),
            Record::new().with("theme", "A"),
            Record::new().with("theme", "B"),
        ]);
        table.set_current_page(2);

        table.sort_by("Thème", SortOrder::Ascending).unwrap();
        let themes: Vec<String> = table
            .records()
            .iter()
            .map(|r| r.get_or_null("theme").to_string())
            .collect();
        assert_eq!(themes, vec!["A", "B", "C"]);
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.sort_key(), Some(("Thème", SortOrder::Ascending)));
    }

    #[test]
    fn test_sort_by_unknown_or_reserved_header_fails_fast() {
        let mut table = table(4);
        table.set_records(numbered(3));

        assert_eq!(
            table.sort_by("Inconnu", SortOrder::Ascending),
            Err(Error::unknown_column("Inconnu"))
        );
        assert_eq!(
            table.sort_by("Actions", SortOrder::Ascending),
            Err(Error::not_sortable("Actions"))
        );
        // Failed sorts leave no indicator
        assert_eq!(table.sort_key(), None);
    }

    #[test]
    fn test_column_visibility() {
        let mut table = table(4);
        assert_eq!(
            table.visible_headers(),
            vec!["Thème", "Statut", "Actions"]
        );

        table.toggle_column_visibility("Statut");
        assert_eq!(table.visible_headers(), vec!["Thème", "Actions"]);
        assert!(!table.is_column_visible("Statut"));

        table.toggle_column_visibility("Statut");
        assert_eq!(
            table.visible_headers(),
            vec!["Thème", "Statut", "Actions"]
        );

        // Unknown headers are ignored without a signal
        let emitted = Arc::new(Mutex::new(0usize));
        let emitted_clone = emitted.clone();
        table.column_visibility_changed.connect(move |_| {
            *emitted_clone.lock() += 1;
        });
        table.toggle_column_visibility("Inconnu");
        assert_eq!(*emitted.lock(), 0);
    }

    #[test]
    fn test_builder_narrower_visible_default() {
        let table = TableState::builder(schema())
            .visible_columns(["Thème", "Actions", "Inconnu"])
            .locale("fr-FR")
            .build()
            .unwrap();
        // Unknown headers are dropped at build
        assert_eq!(table.visible_headers(), vec!["Thème", "Actions"]);
        assert_eq!(table.page_size(), 10);
    }

    #[test]
    fn test_sortable_headers_exclude_reserved() {
        let table = table(4);
        assert_eq!(table.sortable_headers(), vec!["Thème", "Statut"]);
    }

    #[test]
    fn test_signals_fire_in_consistent_state() {
        let mut table = table(4);
        table.set_records(numbered(10));
        table.set_current_page(3);

        let observed = Arc::new(Mutex::new(Vec::new()));

        // model_reset fires after the clamp, page_changed after it
        let log = observed.clone();
        table.model_reset.connect(move |_| {
            log.lock().push("reset".to_string());
        });
        let log = observed.clone();
        table.page_changed.connect(move |&page| {
            log.lock().push(format!("page:{page}"));
        });

        table.set_records(numbered(2));
        assert_eq!(*observed.lock(), vec!["reset", "page:1"]);
    }
}
