//! # herd-io: Table Directories
//!
//! Reads and writes the twelve sourcing tables as a directory of CSV files,
//! one `<table>.csv` per [`TableKind`](herd_core::TableKind).
//!
//! - [`load_tables_dir`] builds an [`InputTables`](herd_core::InputTables)
//!   snapshot. A missing file leaves the table absent, so the model builder
//!   reports it as a missing parameter table.
//! - [`write_template`] writes a complete sample input set to start from.

pub mod csv_dir;
pub mod template;

pub use csv_dir::{load_table, load_tables_dir, table_path, write_table};
pub use template::{sample_tables, write_template, TemplateShape};
