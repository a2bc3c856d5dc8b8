//! Product table persisted as a single JSON document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::format::RowFormat;
use super::r#trait::{AppendOutcome, ProductRow, ProductTable, TableError};
use super::sheet::Sheet;

/// File-backed product table.
///
/// The whole sheet (header, rows, row formats) is rewritten on every
/// mutation through a temp file + rename. All access goes through one mutex,
/// which also makes [`ProductTable::append_if_absent`] atomic within the
/// process. Two processes sharing a file are not coordinated.
#[derive(Debug)]
pub struct JsonFileTable {
    name: String,
    path: PathBuf,
    sheet: Mutex<Sheet>,
}

impl JsonFileTable {
    /// Open `path`, loading existing contents if the file exists.
    pub fn open(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, TableError> {
        let path = path.into();
        let sheet: Sheet = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Sheet::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), rows = sheet.rows().len(), "opened product table");

        Ok(Self {
            name: name.into(),
            path,
            sheet: Mutex::new(sheet),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format attached to `row`, if any.
    pub fn row_format(&self, row: u64) -> Option<RowFormat> {
        self.sheet.lock().ok()?.format_of(row).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Sheet>, TableError> {
        self.sheet.lock().map_err(|_| TableError::Poisoned)
    }

    fn persist(&self, sheet: &Sheet) -> Result<(), TableError> {
        self.write_sheet(sheet).inspect_err(|e| {
            tracing::error!(table = %self.name, path = %self.path.display(), "persist failed: {e}");
        })
    }

    fn write_sheet(&self, sheet: &Sheet) -> Result<(), TableError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(sheet)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `change` to a copy of the sheet and keep it only if it was persisted.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Sheet) -> Result<T, TableError>,
    ) -> Result<T, TableError> {
        let mut sheet = self.lock()?;
        let mut next = sheet.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        *sheet = next;
        Ok(out)
    }
}

impl ProductTable for JsonFileTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn ensure_initialized(&self, header: &[&str]) -> Result<bool, TableError> {
        if self.lock()?.is_initialized() {
            return Ok(false);
        }
        self.mutate(|sheet| Ok(sheet.initialize(header)))
    }

    fn find_by_key(&self, barcode: &str) -> Result<Option<u64>, TableError> {
        Ok(self.lock()?.find(barcode))
    }

    fn append_row(&self, row: ProductRow) -> Result<u64, TableError> {
        self.mutate(|sheet| sheet.append(row))
    }

    fn format_row(&self, row: u64, format: &RowFormat) -> Result<(), TableError> {
        self.mutate(|sheet| sheet.set_format(row, format))
    }

    fn rows(&self) -> Result<Vec<ProductRow>, TableError> {
        Ok(self.lock()?.rows().to_vec())
    }

    fn append_if_absent(&self, row: ProductRow) -> Result<AppendOutcome, TableError> {
        let mut sheet = self.lock()?;
        if let Some(existing_row) = sheet.find(row.key()) {
            return Ok(AppendOutcome::Duplicate { existing_row });
        }
        let mut next = sheet.clone();
        let outcome = next.append_if_absent(row)?;
        self.persist(&next)?;
        *sheet = next;
        Ok(outcome)
    }
}
