//! Client-side tabular data controller for Horizon back-office screens.
//!
//! This crate provides the data layer behind paginated list screens: the
//! host renders rows and widgets, this crate owns the collection and every
//! rule about how it is filtered, ordered, paged and selected.
//!
//! - **Values & Records**: Loosely typed field data as it arrives from an
//!   API payload (`Value`, `Record`)
//! - **Schema**: Display columns as (header, key) pairs, with reserved
//!   synthetic columns that carry no data (`Schema`, `Column`)
//! - **Collation**: Locale-aware string ordering via ICU (`Collation`)
//! - **Sorting**: Stable, non-throwing sort with deterministic placement of
//!   missing values (`SortOrder`, `sorted`)
//! - **Filtering**: Excel-style per-column value filters (`FilterModel`)
//! - **Table State**: Pagination with a self-correcting page clamp, sort
//!   bookkeeping and column visibility (`TableState`)
//! - **Selection**: Row selection by position (`RowSelection`)
//! - **Controller**: A composition facade that keeps base data, filter,
//!   table state and selection consistent (`TableController`)
//!
//! State changes are announced through the signal/slot system of
//! `horizon-tabular-core`, re-exported here.
//!
//! # Quick Start
//!
//! ```
//! use horizon_tabular::{Record, Schema, SortOrder, TableController, Value};
//!
//! // One column per screen header; "Actions" is reserved and carries no data.
//! let schema = Schema::from_pairs([
//!     ("Thème", "theme"),
//!     ("Statut", "status"),
//!     ("Actions", "actions"),
//! ]);
//!
//! let mut controller = TableController::with_locale(schema, 10, "fr-FR").unwrap();
//! controller.set_records(vec![
//!     Record::new().with("theme", "Sécurité").with("status", "Actif"),
//!     Record::new().with("theme", "Accueil").with("status", "Inactif"),
//!     Record::new().with("theme", "Budget").with("status", "Actif"),
//! ]);
//!
//! // Order by header, narrow by column value, read the current page.
//! controller.sort_by("Thème", SortOrder::Ascending).unwrap();
//! controller.set_filter_all("Statut", false);
//! controller.toggle_filter_value("Statut", Value::from("Actif"));
//!
//! assert_eq!(controller.total_records(), 2);
//! assert_eq!(
//!     controller.page_slice()[0].get_or_null("theme").to_string(),
//!     "Budget"
//! );
//! ```
//!
//! # Change Notification Example
//!
//! ```
//! use horizon_tabular::{Record, Schema, TableState};
//!
//! let schema = Schema::from_pairs([("Thème", "theme")]);
//! let mut table = TableState::new(schema, 5).unwrap();
//!
//! // The page counter self-corrects when the collection shrinks; both
//! // requested and corrected moves arrive here.
//! table.page_changed.connect(|page| {
//!     println!("now on page {page}");
//! });
//!
//! let records: Vec<Record> = (0..12)
//!     .map(|i| Record::new().with("theme", format!("T{i:02}")))
//!     .collect();
//! table.set_records(records);
//! table.set_current_page(3);
//! ```

pub mod collation;
pub mod controller;
pub mod error;
pub mod filter;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod selection;
pub mod sort;
pub mod state;
pub mod value;

pub use horizon_tabular_core::{ConnectionGuard, ConnectionId, Signal};

pub use collation::Collation;
pub use controller::TableController;
pub use error::{Error, Result};
pub use filter::FilterModel;
pub use record::Record;
pub use schema::{Column, Schema, RESERVED_HEADERS};
pub use selection::{RowSelection, SelectionMode};
pub use sort::{sorted, SortOrder};
pub use state::{TableState, TableStateBuilder};
pub use value::Value;
