//! Column schema: the ordered (header, key) descriptors that shape a table.
//!
//! A [`Column`] pairs the display header with the record field it reads, so
//! the header list and key list can never drift out of sync. The header
//! string doubles as the column's identity in filter and visibility state.
//!
//! Two headers are reserved: `"Actions"` and `"Sélection"`. The host renders
//! them synthetically (row action buttons, selection checkboxes); they read
//! no record field and are excluded from sorting and from filter-value
//! derivation.

use serde::{Deserialize, Serialize};

/// Display headers with no data backing.
pub const RESERVED_HEADERS: [&str; 2] = ["Actions", "Sélection"];

/// A column descriptor: display header paired with the record field it reads.
///
/// # Example
///
/// ```
/// use horizon_tabular::Column;
///
/// let column = Column::new("Thème", "theme");
/// assert_eq!(column.header, "Thème");
/// assert_eq!(column.key, "theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Display label; also the identity used by filter and visibility state.
    pub header: String,
    /// Record field this column reads.
    pub key: String,
}

impl Column {
    /// Create a column descriptor.
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
        }
    }

    /// Returns `true` if this column's header is reserved (synthetic).
    pub fn is_reserved(&self) -> bool {
        Schema::is_reserved(&self.header)
    }
}

/// The ordered list of column descriptors defining a table's display schema.
///
/// # Example
///
/// ```
/// use horizon_tabular::Schema;
///
/// let schema = Schema::from_pairs([
///     ("Thème", "theme"),
///     ("Statut", "status"),
///     ("Actions", "actions"),
/// ]);
///
/// assert_eq!(schema.key_for("Statut"), Some("status"));
/// assert_eq!(schema.sortable_headers(), vec!["Thème", "Statut"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create a schema from an ordered column list.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Create a schema from ordered (header, key) pairs.
    pub fn from_pairs<H, K>(pairs: impl IntoIterator<Item = (H, K)>) -> Self
    where
        H: Into<String>,
        K: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(header, key)| Column::new(header, key))
                .collect(),
        }
    }

    /// Returns `true` for the reserved synthetic headers.
    pub fn is_reserved(header: &str) -> bool {
        RESERVED_HEADERS.contains(&header)
    }

    /// The ordered column list.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over headers in display order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }

    /// Iterate over the data-backed (non-reserved) columns in order.
    pub fn data_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_reserved())
    }

    /// Returns `true` if a column with this header exists.
    pub fn contains(&self, header: &str) -> bool {
        self.columns.iter().any(|c| c.header == header)
    }

    /// Resolve a header to its record field key.
    ///
    /// With duplicate headers the first pair wins.
    pub fn key_for(&self, header: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.header == header)
            .map(|c| c.key.as_str())
    }

    /// Returns `true` if the header exists and is data-backed.
    pub fn is_sortable(&self, header: &str) -> bool {
        !Self::is_reserved(header) && self.contains(header)
    }

    /// Headers eligible for sorting: all headers minus the reserved ones.
    pub fn sortable_headers(&self) -> Vec<&str> {
        self.data_columns().map(|c| c.header.as_str()).collect()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
