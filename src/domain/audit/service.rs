use super::error::{AuditStoreError, LogFailure};
use crate::infrastructure::repositories::AuditLogRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Records each user action in the audit log.
///
/// Failures are returned as [`LogFailure`] and reported with a warning; the
/// caller's own work has already happened and stands regardless.
pub struct RequestLogger {
    store: Arc<AuditLogRepository>,
}

impl RequestLogger {
    pub fn new(store: Arc<AuditLogRepository>) -> Self {
        Self { store }
    }

    pub async fn log_single_text(&self, input_text: &str) -> Result<Uuid, LogFailure> {
        match self.store.record_single_text(input_text).await {
            Ok(operation) => {
                tracing::info!(
                    operation_id = %operation.id,
                    kind = %operation.kind,
                    "Operation logged"
                );
                Ok(operation.id)
            }
            Err(e) => Err(self.report(e, "single_text")),
        }
    }

    pub async fn log_csv_upload(&self, filename: &str, names: &[String]) -> Result<Uuid, LogFailure> {
        match self.store.record_csv_upload(filename, names).await {
            Ok(operation) => {
                tracing::info!(
                    operation_id = %operation.id,
                    kind = %operation.kind,
                    filename = %filename,
                    names_count = names.len(),
                    "Operation logged"
                );
                Ok(operation.id)
            }
            Err(e) => Err(self.report(e, "csv_upload")),
        }
    }

    fn report(&self, err: AuditStoreError, kind: &str) -> LogFailure {
        if self.store.database().is_enabled() {
            tracing::warn!(error = %err, kind = kind, "Could not log operation");
        } else {
            tracing::debug!(kind = kind, "Audit logging disabled, operation not logged");
        }
        LogFailure(err)
    }
}
