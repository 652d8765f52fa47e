//! Error types for tabular state operations.

/// Result type alias for tabular operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving a table.
///
/// The data path itself never fails: empty collections, absent fields and
/// duplicate values all produce well-defined outputs. The only failures are
/// caller errors caught at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A header was referenced that the schema does not define.
    #[error("Unknown column '{header}': not present in the schema")]
    UnknownColumn { header: String },

    /// A reserved synthetic column ("Actions", "Sélection") was used where a
    /// data-backed column is required.
    #[error("Column '{header}' is synthetic and cannot be sorted")]
    NotSortable { header: String },

    /// A page size of zero would make the page count diverge.
    #[error("Invalid page size {page_size}: must be at least 1")]
    InvalidPageSize { page_size: usize },
}

impl Error {
    /// Create an unknown-column error.
    pub fn unknown_column(header: impl Into<String>) -> Self {
        Self::UnknownColumn {
            header: header.into(),
        }
    }

    /// Create a not-sortable error.
    pub fn not_sortable(header: impl Into<String>) -> Self {
        Self::NotSortable {
            header: header.into(),
        }
    }

    /// Create an invalid-page-size error.
    pub fn invalid_page_size(page_size: usize) -> Self {
        Self::InvalidPageSize { page_size }
    }
}
