//! Infrastructure layer: the product table behind the append service.

pub mod table;

pub use table::{
    AppendOutcome, InMemoryTable, JsonFileTable, ProductRow, ProductTable, RowFormat, TableError,
};
