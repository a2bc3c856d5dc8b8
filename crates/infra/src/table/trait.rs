use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dukascan_core::ProductSubmission;

use super::format::RowFormat;

/// Fixed header row written when a table is first created.
pub const HEADER: [&str; 6] = ["Timestamp", "Barcode", "Name", "Description", "Price", "Quantity"];

/// 0-based column holding the unique key.
pub const BARCODE_COLUMN: usize = 1;

/// One data row of the product table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub timestamp: DateTime<Utc>,
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl ProductRow {
    /// Stamp a coerced submission with its append time.
    pub fn new(submission: ProductSubmission, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            barcode: submission.barcode,
            name: submission.name,
            description: submission.description,
            price: submission.price,
            quantity: submission.quantity,
        }
    }

    /// Key used for duplicate detection (the [`BARCODE_COLUMN`] cell).
    pub fn key(&self) -> &str {
        &self.barcode
    }
}

/// Result of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Row appended at this 1-based sheet row.
    Appended(u64),
    /// A row with the same barcode already lives at this sheet row.
    Duplicate { existing_row: u64 },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has not been initialized")]
    NotInitialized,
    #[error("row {0} does not exist")]
    NoSuchRow(u64),
    #[error("table lock poisoned")]
    Poisoned,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Append-only table with a header row and a unique barcode column.
///
/// Row numbers are 1-based sheet rows: the header is row 1, so the first data
/// row is row 2.
pub trait ProductTable: Send + Sync {
    /// Human-readable table name (used in logs).
    fn name(&self) -> &str;

    /// Create the table with `header` if it does not exist yet.
    ///
    /// Returns `true` when this call created it.
    fn ensure_initialized(&self, header: &[&str]) -> Result<bool, TableError>;

    /// Linear scan of the data rows for an exact barcode match.
    fn find_by_key(&self, barcode: &str) -> Result<Option<u64>, TableError>;

    /// Unconditionally append `row`, returning its sheet row.
    fn append_row(&self, row: ProductRow) -> Result<u64, TableError>;

    /// Attach presentation formatting to an existing row.
    fn format_row(&self, row: u64, format: &RowFormat) -> Result<(), TableError>;

    /// Snapshot of all data rows in append order.
    fn rows(&self) -> Result<Vec<ProductRow>, TableError>;

    /// Append `row` unless its barcode is already present.
    ///
    /// The default is check-then-append and is NOT atomic: two concurrent
    /// callers can both miss each other's row. Stores that can do better
    /// override it.
    fn append_if_absent(&self, row: ProductRow) -> Result<AppendOutcome, TableError> {
        if let Some(existing_row) = self.find_by_key(row.key())? {
            return Ok(AppendOutcome::Duplicate { existing_row });
        }
        self.append_row(row).map(AppendOutcome::Appended)
    }
}

impl<T> ProductTable for Arc<T>
where
    T: ProductTable + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ensure_initialized(&self, header: &[&str]) -> Result<bool, TableError> {
        (**self).ensure_initialized(header)
    }

    fn find_by_key(&self, barcode: &str) -> Result<Option<u64>, TableError> {
        (**self).find_by_key(barcode)
    }

    fn append_row(&self, row: ProductRow) -> Result<u64, TableError> {
        (**self).append_row(row)
    }

    fn format_row(&self, row: u64, format: &RowFormat) -> Result<(), TableError> {
        (**self).format_row(row, format)
    }

    fn rows(&self) -> Result<Vec<ProductRow>, TableError> {
        (**self).rows()
    }

    fn append_if_absent(&self, row: ProductRow) -> Result<AppendOutcome, TableError> {
        (**self).append_if_absent(row)
    }
}
