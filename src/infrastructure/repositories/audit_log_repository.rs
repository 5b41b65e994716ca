use sqlx::types::Json;
use sqlx::PgConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::audit::model::{CsvUploadOperationRow, CsvUploadRow, OperationDetailRow};
use crate::domain::audit::{
    AuditStoreError, AuditSummary, CsvUploadEntry, CsvUploadOperation, NamesPayload, Operation,
    OperationDetail, OperationKind, SingleTextEntry, SingleTextOperation,
};
use crate::infrastructure::db::{check_connection, AuditDatabase, DbPool};

const SUMMARY_SAMPLE_SIZE: i64 = 5;

pub type StoreResult<T> = Result<T, AuditStoreError>;

/// Append-only store for operations and their single-text / CSV entries.
pub struct AuditLogRepository {
    db: Arc<AuditDatabase>,
}

impl AuditLogRepository {
    pub fn new(db: Arc<AuditDatabase>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &AuditDatabase {
        &self.db
    }

    async fn pool(&self) -> StoreResult<&DbPool> {
        self.db.pool().await
    }

    /// Insert a new operation and return its generated id
    pub async fn create_operation(&self, kind: OperationKind) -> StoreResult<Uuid> {
        let mut conn = self.pool().await?.acquire().await?;
        let operation = insert_operation(&mut conn, kind).await?;
        Ok(operation.id)
    }

    /// Attach the single-text entry of an existing `single_text` operation
    pub async fn attach_single_text(&self, id: Uuid, input_text: &str) -> StoreResult<()> {
        ensure_input_text(input_text)?;

        let mut tx = self.pool().await?.begin().await?;
        lock_childless_operation(&mut tx, id, OperationKind::SingleText).await?;
        insert_single_text_entry(&mut tx, id, input_text).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Attach the CSV upload entry of an existing `csv_upload` operation
    pub async fn attach_csv_upload(
        &self,
        id: Uuid,
        source_filename: &str,
        names: &[String],
    ) -> StoreResult<()> {
        let mut tx = self.pool().await?.begin().await?;
        lock_childless_operation(&mut tx, id, OperationKind::CsvUpload).await?;
        insert_csv_upload_entry(&mut tx, id, source_filename, names).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Write a `single_text` operation and its entry in one transaction
    pub async fn record_single_text(&self, input_text: &str) -> StoreResult<Operation> {
        ensure_input_text(input_text)?;

        let mut tx = self.pool().await?.begin().await?;
        let operation = insert_operation(&mut tx, OperationKind::SingleText).await?;
        insert_single_text_entry(&mut tx, operation.id, input_text).await?;
        tx.commit().await?;

        Ok(operation)
    }

    /// Write a `csv_upload` operation and its entry in one transaction
    pub async fn record_csv_upload(
        &self,
        source_filename: &str,
        names: &[String],
    ) -> StoreResult<Operation> {
        let mut tx = self.pool().await?.begin().await?;
        let operation = insert_operation(&mut tx, OperationKind::CsvUpload).await?;
        insert_csv_upload_entry(&mut tx, operation.id, source_filename, names).await?;
        tx.commit().await?;

        Ok(operation)
    }

    pub async fn list_operations(&self, limit: Option<i64>) -> StoreResult<Vec<Operation>> {
        let operations = sqlx::query_as::<_, Operation>(
            r#"
            SELECT id, kind, created_at
            FROM operation
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(operations)
    }

    pub async fn list_single_text(&self, limit: Option<i64>) -> StoreResult<Vec<SingleTextEntry>> {
        let entries = sqlx::query_as::<_, SingleTextEntry>(
            r#"
            SELECT id, input_text, created_at
            FROM single_text_entry
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(entries)
    }

    pub async fn list_csv_uploads(&self, limit: Option<i64>) -> StoreResult<Vec<CsvUploadEntry>> {
        let rows = sqlx::query_as::<_, CsvUploadRow>(
            r#"
            SELECT id, source_filename, names_json, created_at
            FROM csv_upload_entry
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(rows.into_iter().map(CsvUploadEntry::from).collect())
    }

    /// Single-text operations that have their entry
    pub async fn joined_single_text(
        &self,
        limit: Option<i64>,
    ) -> StoreResult<Vec<SingleTextOperation>> {
        let operations = sqlx::query_as::<_, SingleTextOperation>(
            r#"
            SELECT o.id, o.kind, o.created_at, s.input_text, s.created_at AS entry_created_at
            FROM operation o
            INNER JOIN single_text_entry s ON s.id = o.id
            WHERE o.kind = 'single_text'
            ORDER BY o.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(operations)
    }

    /// CSV upload operations that have their entry
    pub async fn joined_csv_uploads(
        &self,
        limit: Option<i64>,
    ) -> StoreResult<Vec<CsvUploadOperation>> {
        let rows = sqlx::query_as::<_, CsvUploadOperationRow>(
            r#"
            SELECT o.id, o.kind, o.created_at, c.source_filename, c.names_json,
                   c.created_at AS entry_created_at
            FROM operation o
            INNER JOIN csv_upload_entry c ON c.id = o.id
            WHERE o.kind = 'csv_upload'
            ORDER BY o.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool().await?)
        .await?;

        Ok(rows.into_iter().map(CsvUploadOperation::from).collect())
    }

    /// Operation with whichever child it has, if the operation exists
    pub async fn get_operation(&self, id: Uuid) -> StoreResult<Option<OperationDetail>> {
        let row = sqlx::query_as::<_, OperationDetailRow>(
            r#"
            SELECT o.id, o.kind, o.created_at,
                   s.input_text, s.created_at AS single_text_created_at,
                   c.source_filename, c.names_json, c.created_at AS csv_upload_created_at
            FROM operation o
            LEFT JOIN single_text_entry s ON s.id = o.id
            LEFT JOIN csv_upload_entry c ON c.id = o.id
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool().await?)
        .await?;

        Ok(row.map(OperationDetail::from))
    }

    pub async fn summary(&self) -> StoreResult<AuditSummary> {
        let pool = self.pool().await?;

        let (operation_count, single_text_count, csv_upload_count) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM operation),
                    (SELECT COUNT(*) FROM single_text_entry),
                    (SELECT COUNT(*) FROM csv_upload_entry)
                "#,
            )
            .fetch_one(pool)
            .await?;

        Ok(AuditSummary {
            operation_count,
            single_text_count,
            csv_upload_count,
            recent_operations: self.list_operations(Some(SUMMARY_SAMPLE_SIZE)).await?,
            recent_single_text: self.list_single_text(Some(SUMMARY_SAMPLE_SIZE)).await?,
            recent_csv_uploads: self.list_csv_uploads(Some(SUMMARY_SAMPLE_SIZE)).await?,
        })
    }

    /// Round-trip a trivial query. Any failure yields `false`.
    pub async fn health_check(&self) -> bool {
        match self.pool().await {
            Ok(pool) => check_connection(pool).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

fn ensure_input_text(input_text: &str) -> StoreResult<()> {
    if input_text.is_empty() {
        return Err(AuditStoreError::ConstraintViolation(
            "input_text must not be empty".to_string(),
        ));
    }
    Ok(())
}

async fn insert_operation(conn: &mut PgConnection, kind: OperationKind) -> StoreResult<Operation> {
    let operation = sqlx::query_as::<_, Operation>(
        r#"
        INSERT INTO operation (id, kind)
        VALUES ($1, $2)
        RETURNING id, kind, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(kind)
    .fetch_one(conn)
    .await?;

    Ok(operation)
}

async fn insert_single_text_entry(
    conn: &mut PgConnection,
    id: Uuid,
    input_text: &str,
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO single_text_entry (id, input_text)
        VALUES ($1, $2)
        "#,
    )
    .bind(id)
    .bind(input_text)
    .execute(conn)
    .await?;

    Ok(())
}

async fn insert_csv_upload_entry(
    conn: &mut PgConnection,
    id: Uuid,
    source_filename: &str,
    names: &[String],
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO csv_upload_entry (id, source_filename, names_json)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(id)
    .bind(source_filename)
    .bind(Json(NamesPayload::new(names.to_vec())))
    .execute(conn)
    .await?;

    Ok(())
}

/// Lock the parent row and check it is of `expected` kind with no child yet.
async fn lock_childless_operation(
    conn: &mut PgConnection,
    id: Uuid,
    expected: OperationKind,
) -> StoreResult<()> {
    let parent = sqlx::query_as::<_, (OperationKind, bool)>(
        r#"
        SELECT o.kind, (s.id IS NOT NULL OR c.id IS NOT NULL) AS has_child
        FROM operation o
        LEFT JOIN single_text_entry s ON s.id = o.id
        LEFT JOIN csv_upload_entry c ON c.id = o.id
        WHERE o.id = $1
        FOR UPDATE OF o
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match parent {
        None => Err(AuditStoreError::ConstraintViolation(format!(
            "operation {} does not exist",
            id
        ))),
        Some((kind, _)) if kind != expected => Err(AuditStoreError::ConstraintViolation(format!(
            "operation {} is a {} operation, not {}",
            id, kind, expected
        ))),
        Some((_, true)) => Err(AuditStoreError::ConstraintViolation(format!(
            "operation {} already has an entry",
            id
        ))),
        Some(_) => Ok(()),
    }
}
