//! Column-level multi-value filtering.
//!
//! [`FilterModel`] derives, per data-backed column, the distinct values
//! present in a record collection, and narrows collections through
//! per-column accepted-sets the host mutates from its filter widgets.
//!
//! The accepted-set semantics carry a deliberate asymmetry from the host
//! application, and the UI depends on it:
//!
//! - A header with **no entry** imposes no constraint, and the query side
//!   ([`FilterModel::is_selected`], [`FilterModel::has_active_filter`])
//!   reports every value as accepted.
//! - A header with an **empty entry** (every value toggled off) still
//!   reports "all accepted" on the query side, but [`FilterModel::apply`]
//!   accepts nothing for that column and excludes every row.
//! - When **no header was ever touched**, `apply` passes the collection
//!   through unchanged.
//!
//! Keep that asymmetry intact; the tests in this module pin it.

use std::collections::{BTreeMap, HashMap, HashSet};

use horizon_tabular_core::Signal;

use crate::collation::Collation;
use crate::record::Record;
use crate::schema::Schema;
use crate::value::Value;

/// Column filter engine over an in-memory record collection.
///
/// # Example
///
/// ```
/// use horizon_tabular::{FilterModel, Record, Schema, Value};
///
/// let schema = Schema::from_pairs([("Statut", "status"), ("Actions", "actions")]);
/// let records = vec![
///     Record::new().with("status", "Actif"),
///     Record::new().with("status", "Inactif"),
///     Record::new().with("status", "Actif"),
/// ];
///
/// let mut filter = FilterModel::with_locale(schema, "fr-FR");
/// filter.set_records(&records);
/// assert_eq!(filter.distinct_values("Statut").len(), 2);
///
/// filter.toggle_value("Statut", Value::from("Actif"));
/// let narrowed = filter.apply(&records);
/// assert_eq!(narrowed.len(), 2);
/// ```
pub struct FilterModel {
    schema: Schema,
    collation: Collation,
    /// Per-header distinct values, collation-sorted, deduplicated.
    distinct: BTreeMap<String, Vec<Value>>,
    /// Per-header accepted-sets; only headers the host has touched appear.
    accepted: HashMap<String, HashSet<Value>>,

    /// Emitted with the header whose accepted-set changed.
    pub filter_changed: Signal<String>,
}

impl FilterModel {
    /// Create a filter engine for a schema, using the system locale.
    pub fn new(schema: Schema) -> Self {
        Self::with_collation(schema, Collation::new())
    }

    /// Create a filter engine with an explicit locale.
    pub fn with_locale(schema: Schema, locale: &str) -> Self {
        Self::with_collation(schema, Collation::with_locale(locale))
    }

    fn with_collation(schema: Schema, collation: Collation) -> Self {
        Self {
            schema,
            collation,
            distinct: BTreeMap::new(),
            accepted: HashMap::new(),
            filter_changed: Signal::new(),
        }
    }

    /// The schema this engine derives filterable columns from.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Recompute the distinct-value lists from a fresh collection.
    ///
    /// Accepted-sets are left untouched: filter state persists for the
    /// lifetime of the screen, across data refreshes.
    pub fn set_records(&mut self, records: &[Record]) {
        self.distinct.clear();
        for column in self.schema.data_columns() {
            let mut seen: HashSet<&Value> = HashSet::new();
            let mut values: Vec<Value> = Vec::new();
            for record in records {
                if let Some(value) = record.get(&column.key) {
                    if !value.is_null() && seen.insert(value) {
                        values.push(value.clone());
                    }
                }
            }

            // Collation order on display strings; the value's total order
            // breaks ties so the result is deterministic for equal strings.
            let mut keyed: Vec<(String, Value)> =
                values.into_iter().map(|v| (v.to_string(), v)).collect();
            keyed.sort_by(|(sa, va), (sb, vb)| {
                self.collation.compare(sa, sb).then_with(|| va.cmp(vb))
            });

            self.distinct.insert(
                column.header.clone(),
                keyed.into_iter().map(|(_, v)| v).collect(),
            );
        }
        tracing::debug!(
            target: "horizon_tabular::filter",
            columns = self.distinct.len(),
            records = records.len(),
            "distinct value lists recomputed"
        );
    }

    /// The distinct values for a header, collation-sorted.
    ///
    /// Reserved and unknown headers yield an empty slice.
    pub fn distinct_values(&self, header: &str) -> &[Value] {
        self.distinct
            .get(header)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Narrow a collection through the current accepted-sets.
    ///
    /// Fast path: when no header has ever been touched the input passes
    /// through unchanged. Otherwise a record passes if, for every header
    /// with an entry, the record's value for that header's field is a
    /// member of the accepted-set, so a present-but-empty set excludes
    /// every row (see the module docs for the intended asymmetry).
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        if self.accepted.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.accepts(record))
            .cloned()
            .collect()
    }

    fn accepts(&self, record: &Record) -> bool {
        self.accepted.iter().all(|(header, set)| {
            match self.schema.key_for(header) {
                Some(key) => set.contains(record.get_or_null(key)),
                // State and schema can only disagree if the host mutated the
                // schema out from under us; an unresolvable header matches
                // nothing, like a field no record has.
                None => false,
            }
        })
    }

    /// Flip membership of `value` in the accepted-set for `header`,
    /// creating the set on first use.
    pub fn toggle_value(&mut self, header: &str, value: Value) {
        if !self.is_filterable(header) {
            tracing::debug!(
                target: "horizon_tabular::filter",
                header,
                "ignoring toggle for non-filterable column"
            );
            return;
        }
        let set = self.accepted.entry(header.to_string()).or_default();
        if !set.remove(&value) {
            set.insert(value);
        }
        self.filter_changed.emit(header.to_string());
    }

    /// Set the accepted-set for `header` to the full distinct list
    /// (`select` = true) or the empty set (`select` = false).
    pub fn select_all(&mut self, header: &str, select: bool) {
        if !self.is_filterable(header) {
            tracing::debug!(
                target: "horizon_tabular::filter",
                header,
                "ignoring select-all for non-filterable column"
            );
            return;
        }
        let set: HashSet<Value> = if select {
            self.distinct
                .get(header)
                .map(|values| values.iter().cloned().collect())
                .unwrap_or_default()
        } else {
            HashSet::new()
        };
        self.accepted.insert(header.to_string(), set);
        self.filter_changed.emit(header.to_string());
    }

    /// Whether `value` shows as checked in the filter widget for `header`.
    ///
    /// True when the header has no entry or an empty entry (default "all
    /// accepted"), or when the value is a member of the accepted-set.
    pub fn is_selected(&self, header: &str, value: &Value) -> bool {
        match self.accepted.get(header) {
            None => true,
            Some(set) if set.is_empty() => true,
            Some(set) => set.contains(value),
        }
    }

    /// True only when the accepted-set for `header` is non-empty; drives the
    /// "filter active" flag on column headers.
    pub fn has_active_filter(&self, header: &str) -> bool {
        self.accepted.get(header).is_some_and(|set| !set.is_empty())
    }

    /// Headers whose filters are currently active, in schema order.
    pub fn active_headers(&self) -> Vec<&str> {
        self.schema
            .headers()
            .filter(|header| self.has_active_filter(header))
            .collect()
    }

    /// Reset the filter state to empty (every entry removed).
    pub fn clear_all(&mut self) {
        if self.accepted.is_empty() {
            return;
        }
        let mut headers: Vec<String> = self.accepted.keys().cloned().collect();
        headers.sort();
        self.accepted.clear();
        for header in headers {
            self.filter_changed.emit(header);
        }
    }

    fn is_filterable(&self, header: &str) -> bool {
        !Schema::is_reserved(header) && self.schema.contains(header)
    }
}

impl std::fmt::Debug for FilterModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterModel")
            .field("schema", &self.schema)
            .field("distinct", &self.distinct)
            .field("accepted", &self.accepted)
            .finish_non_exhaustive()
    }
}
