//! Plain sheet contents shared by the bundled stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::RowFormat;
use super::r#trait::{AppendOutcome, ProductRow, TableError};

/// Sheet row of the first data row (the header is row 1).
const FIRST_DATA_ROW: u64 = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Sheet {
    /// Empty until the table is initialized.
    header: Vec<String>,
    rows: Vec<ProductRow>,
    #[serde(default)]
    formats: BTreeMap<u64, RowFormat>,
}

impl Sheet {
    pub(crate) fn is_initialized(&self) -> bool {
        !self.header.is_empty()
    }

    pub(crate) fn initialize(&mut self, header: &[&str]) -> bool {
        if self.is_initialized() {
            return false;
        }
        self.header = header.iter().map(|h| (*h).to_string()).collect();
        true
    }

    fn row_number(index: usize) -> u64 {
        index as u64 + FIRST_DATA_ROW
    }

    pub(crate) fn find(&self, barcode: &str) -> Option<u64> {
        self.rows
            .iter()
            .position(|r| r.key() == barcode)
            .map(Self::row_number)
    }

    pub(crate) fn append(&mut self, row: ProductRow) -> Result<u64, TableError> {
        if !self.is_initialized() {
            return Err(TableError::NotInitialized);
        }
        self.rows.push(row);
        Ok(Self::row_number(self.rows.len() - 1))
    }

    /// Check and append under the caller's exclusive borrow.
    pub(crate) fn append_if_absent(&mut self, row: ProductRow) -> Result<AppendOutcome, TableError> {
        if let Some(existing_row) = self.find(row.key()) {
            return Ok(AppendOutcome::Duplicate { existing_row });
        }
        self.append(row).map(AppendOutcome::Appended)
    }

    pub(crate) fn set_format(&mut self, row: u64, format: &RowFormat) -> Result<(), TableError> {
        let in_range = row >= FIRST_DATA_ROW && row < Self::row_number(self.rows.len());
        if !in_range {
            return Err(TableError::NoSuchRow(row));
        }
        self.formats.insert(row, format.clone());
        Ok(())
    }

    pub(crate) fn format_of(&self, row: u64) -> Option<&RowFormat> {
        self.formats.get(&row)
    }

    pub(crate) fn rows(&self) -> &[ProductRow] {
        &self.rows
    }
}
