//! Prelude module for Horizon Tabular.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_tabular::prelude::*;
//! ```
//!
//! This provides access to:
//! - Data model (`Value`, `Record`)
//! - Display schema (`Schema`, `Column`)
//! - Filtering, table state and selection (`FilterModel`, `TableState`,
//!   `RowSelection`)
//! - The composition facade (`TableController`)
//! - Signal/slot system (`Signal`, `ConnectionId`)

// ============================================================================
// Data Model
// ============================================================================

pub use crate::record::Record;
pub use crate::value::Value;

// ============================================================================
// Display Schema
// ============================================================================

pub use crate::schema::{Column, Schema};

// ============================================================================
// Ordering and Filtering
// ============================================================================

pub use crate::collation::Collation;
pub use crate::filter::FilterModel;
pub use crate::sort::SortOrder;

// ============================================================================
// Table State and Selection
// ============================================================================

pub use crate::selection::{RowSelection, SelectionMode};
pub use crate::state::{TableState, TableStateBuilder};

// ============================================================================
// Composition Facade
// ============================================================================

pub use crate::controller::TableController;

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use horizon_tabular_core::{ConnectionGuard, ConnectionId, Signal};
