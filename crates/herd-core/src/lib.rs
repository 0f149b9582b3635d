//! # herd-core: Livestock Sourcing Data Core
//!
//! Provides the input-side data structures for weekly livestock sourcing
//! models: typed dimension identifiers, raw tabular records, the schemas of the
//! twelve input tables, and the parameter index that turns a table into a
//! keyed lookup with zero defaults.
//!
//! ## Data Flow
//!
//! ```text
//! raw tables ──> ParamIndex ──> (herd-algo) model builder ──> solver ──> aggregator
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use herd_core::{build_index, Cell, Table};
//!
//! let mut demand = Table::new("demand", ["week", "demand"]);
//! demand.push_row([Cell::text("27.2025"), Cell::number(100.0)]).unwrap();
//!
//! let index = build_index(&demand, &["week"], "demand").unwrap();
//! assert_eq!(index.get_or_zero("27.2025"), 100.0);
//! assert_eq!(index.get_or_zero("28.2025"), 0.0);
//! ```
//!
//! ## Missing Data Policy
//!
//! Absent key combinations are legitimate (a zone/plant pair without a lane
//! simply has no transport cost), so every lookup goes through
//! [`ParamIndex::get_or_zero`]. Only structurally absent tables or columns are
//! errors; see [`HerdError`].

pub mod error;
pub mod ids;
pub mod index;
pub mod schema;
pub mod table;

pub use error::{HerdError, HerdResult};
pub use ids::{PlantId, WeekId, ZoneId};
pub use index::{build_index, ParamIndex, ParamKey};
pub use schema::{TableKind, TableSchema};
pub use table::{Cell, InputTables, Table};
