//! Core systems for Horizon Tabular.
//!
//! This crate provides the foundational change-notification layer used by the
//! Horizon Tabular data models:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Connection Management**: Id-based and RAII-scoped disconnection
//!
//! The models in `horizon-tabular` expose their lifecycle (data replaced,
//! rows reordered, page changed, filters touched) as public [`Signal`]
//! fields; hosts connect slots to drive whatever rendering layer they use.
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tabular_core::Signal;
//!
//! // Create a signal that notifies when the page changes
//! let page_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = page_changed.connect(|page| {
//!     println!("Now on page {}", page);
//! });
//!
//! // Emit the signal
//! page_changed.emit(2);
//!
//! // Disconnect when done
//! page_changed.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
