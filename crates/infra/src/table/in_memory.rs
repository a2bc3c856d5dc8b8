use std::sync::RwLock;

use super::format::RowFormat;
use super::r#trait::{AppendOutcome, ProductRow, ProductTable, TableError};
use super::sheet::Sheet;

/// In-memory product table.
///
/// Intended for tests/dev. Duplicate check and append run under one write
/// lock, so concurrent saves of the same barcode cannot both land.
#[derive(Debug)]
pub struct InMemoryTable {
    name: String,
    sheet: RwLock<Sheet>,
}

impl InMemoryTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheet: RwLock::new(Sheet::default()),
        }
    }

    /// Format attached to `row`, if any.
    pub fn row_format(&self, row: u64) -> Option<RowFormat> {
        self.sheet.read().ok()?.format_of(row).cloned()
    }
}

impl Default for InMemoryTable {
    fn default() -> Self {
        Self::new("Products")
    }
}

impl ProductTable for InMemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn ensure_initialized(&self, header: &[&str]) -> Result<bool, TableError> {
        let mut sheet = self.sheet.write().map_err(|_| TableError::Poisoned)?;
        Ok(sheet.initialize(header))
    }

    fn find_by_key(&self, barcode: &str) -> Result<Option<u64>, TableError> {
        let sheet = self.sheet.read().map_err(|_| TableError::Poisoned)?;
        Ok(sheet.find(barcode))
    }

    fn append_row(&self, row: ProductRow) -> Result<u64, TableError> {
        let mut sheet = self.sheet.write().map_err(|_| TableError::Poisoned)?;
        sheet.append(row)
    }

    fn format_row(&self, row: u64, format: &RowFormat) -> Result<(), TableError> {
        let mut sheet = self.sheet.write().map_err(|_| TableError::Poisoned)?;
        sheet.set_format(row, format)
    }

    fn rows(&self) -> Result<Vec<ProductRow>, TableError> {
        let sheet = self.sheet.read().map_err(|_| TableError::Poisoned)?;
        Ok(sheet.rows().to_vec())
    }

    fn append_if_absent(&self, row: ProductRow) -> Result<AppendOutcome, TableError> {
        let mut sheet = self.sheet.write().map_err(|_| TableError::Poisoned)?;
        sheet.append_if_absent(row)
    }
}
