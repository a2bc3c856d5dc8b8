//! Append service: validate, dedupe by barcode, append, format.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use dukascan_core::wire::failed_to_save;
use dukascan_core::{DomainError, ProductSubmission, RemoteReply, SavedRow};
use dukascan_infra::table::HEADER;
use dukascan_infra::{AppendOutcome, ProductRow, ProductTable, RowFormat, TableError};

/// Stateless request handler over a shared table.
pub struct AppendService {
    table: Arc<dyn ProductTable>,
    format: RowFormat,
}

impl std::fmt::Debug for AppendService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendService")
            .field("table", &self.table.name())
            .field("format", &self.format)
            .finish()
    }
}

impl AppendService {
    pub fn new(table: Arc<dyn ProductTable>) -> Self {
        Self {
            table,
            format: RowFormat::default(),
        }
    }

    pub fn table(&self) -> &Arc<dyn ProductTable> {
        &self.table
    }

    /// Liveness reply stamped with the current time.
    pub fn liveness(&self) -> RemoteReply {
        RemoteReply::alive(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Handle one POST body. Never fails: every problem becomes a reply.
    pub fn append(&self, body: &[u8]) -> RemoteReply {
        let submission = match ProductSubmission::from_body(body) {
            Ok(submission) => submission,
            Err(DomainError::Malformed(detail)) => {
                tracing::warn!("rejected unparsable body: {detail}");
                return RemoteReply::error(failed_to_save(detail));
            }
            Err(e @ DomainError::MissingRequiredFields) => {
                tracing::warn!("rejected payload: {e}");
                return RemoteReply::error(e.to_string());
            }
        };

        match self.store(submission) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(table = self.table.name(), "append failed: {e}");
                RemoteReply::error(failed_to_save(e))
            }
        }
    }

    fn store(&self, submission: ProductSubmission) -> Result<RemoteReply, TableError> {
        if self.table.ensure_initialized(&HEADER)? {
            tracing::info!(table = self.table.name(), "created table with header row");
        }

        let row = ProductRow::new(submission, Utc::now());
        let barcode = row.barcode.clone();
        let name = row.name.clone();
        let rendered = self.format.render(&row);

        match self.table.append_if_absent(row)? {
            AppendOutcome::Duplicate { existing_row } => {
                tracing::warn!(%barcode, existing_row, "duplicate barcode");
                Ok(RemoteReply::duplicate())
            }
            AppendOutcome::Appended(row) => {
                self.table.format_row(row, &self.format)?;
                tracing::info!(%barcode, row, "product appended");
                tracing::debug!("row {row}: {rendered}");
                Ok(RemoteReply::saved(SavedRow { barcode, name, row }))
            }
        }
    }
}
