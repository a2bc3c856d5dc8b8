//! Append-only product table abstractions.
//!
//! The append service treats its spreadsheet as an opaque table with a fixed
//! header. Stores implement [`ProductTable`]; the service only ever talks to
//! `Arc<dyn ProductTable>`.

pub mod format;
pub mod in_memory;
pub mod json_file;
mod sheet;
pub mod r#trait;

pub use format::{Align, RenderedRow, RowFormat};
pub use in_memory::InMemoryTable;
pub use json_file::JsonFileTable;
pub use r#trait::{AppendOutcome, ProductRow, ProductTable, TableError, BARCODE_COLUMN, HEADER};
