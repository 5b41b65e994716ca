use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::audit::{
        AuditSummary, CsvUploadOperation, Operation, OperationDetail, SingleTextOperation,
    },
    error::{AppError, AppResult},
    infrastructure::repositories::AuditLogRepository,
};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

impl LimitQuery {
    fn validated(&self) -> AppResult<Option<i64>> {
        match self.limit {
            Some(limit) if limit < 0 => Err(AppError::BadRequest(
                "limit must not be negative".to_string(),
            )),
            limit => Ok(limit),
        }
    }
}

/// Read-only views of the audit log
pub struct OperationsController {
    store: Arc<AuditLogRepository>,
}

impl OperationsController {
    pub fn new(store: Arc<AuditLogRepository>) -> Self {
        Self { store }
    }

    /// GET /api/operations - Most recent operations
    pub async fn list_operations(
        State(controller): State<Arc<OperationsController>>,
        Query(query): Query<LimitQuery>,
    ) -> AppResult<Json<Vec<Operation>>> {
        let operations = controller.store.list_operations(query.validated()?).await?;
        Ok(Json(operations))
    }

    /// GET /api/operations/single-text - Single-text operations with their text
    pub async fn list_single_text(
        State(controller): State<Arc<OperationsController>>,
        Query(query): Query<LimitQuery>,
    ) -> AppResult<Json<Vec<SingleTextOperation>>> {
        let operations = controller
            .store
            .joined_single_text(query.validated()?)
            .await?;
        Ok(Json(operations))
    }

    /// GET /api/operations/csv-uploads - CSV upload operations with their names
    pub async fn list_csv_uploads(
        State(controller): State<Arc<OperationsController>>,
        Query(query): Query<LimitQuery>,
    ) -> AppResult<Json<Vec<CsvUploadOperation>>> {
        let operations = controller
            .store
            .joined_csv_uploads(query.validated()?)
            .await?;
        Ok(Json(operations))
    }

    /// GET /api/operations/summary - Record counts and latest records
    pub async fn summary(
        State(controller): State<Arc<OperationsController>>,
    ) -> AppResult<Json<AuditSummary>> {
        Ok(Json(controller.store.summary().await?))
    }

    /// GET /api/operations/{id} - One operation and its entry
    pub async fn get_operation(
        State(controller): State<Arc<OperationsController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<Json<OperationDetail>> {
        controller
            .store
            .get_operation(id)
            .await?
            .map(Json)
            .ok_or_else(|| AppError::NotFound(format!("Operation {}", id)))
    }
}
