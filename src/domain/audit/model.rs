use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// What a user did: pronounce one text, or upload a CSV of names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    SingleText,
    CsvUpload,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::SingleText => write!(f, "single_text"),
            OperationKind::CsvUpload => write!(f, "csv_upload"),
        }
    }
}

/// Driver record of the audit log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Operation {
    pub id: Uuid,
    pub kind: OperationKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SingleTextEntry {
    pub id: Uuid,
    pub input_text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload stored in `csv_upload_entry.names_json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamesPayload {
    pub names: Vec<String>,
    pub count: usize,
}

impl NamesPayload {
    pub fn new(names: Vec<String>) -> Self {
        let count = names.len();
        Self { names, count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CsvUploadEntry {
    pub id: Uuid,
    pub source_filename: String,
    pub names: Vec<String>,
    pub names_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct CsvUploadRow {
    pub id: Uuid,
    pub source_filename: String,
    pub names_json: Json<NamesPayload>,
    pub created_at: DateTime<Utc>,
}

impl From<CsvUploadRow> for CsvUploadEntry {
    fn from(row: CsvUploadRow) -> Self {
        let Json(payload) = row.names_json;
        Self {
            id: row.id,
            source_filename: row.source_filename,
            names_count: payload.count,
            names: payload.names,
            created_at: row.created_at,
        }
    }
}

/// Operation joined with its single-text entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SingleTextOperation {
    pub id: Uuid,
    pub kind: OperationKind,
    pub created_at: DateTime<Utc>,
    pub input_text: String,
    pub entry_created_at: DateTime<Utc>,
}

/// Operation joined with its CSV upload entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CsvUploadOperation {
    pub id: Uuid,
    pub kind: OperationKind,
    pub created_at: DateTime<Utc>,
    pub source_filename: String,
    pub names: Vec<String>,
    pub names_count: usize,
    pub entry_created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct CsvUploadOperationRow {
    pub id: Uuid,
    pub kind: OperationKind,
    pub created_at: DateTime<Utc>,
    pub source_filename: String,
    pub names_json: Json<NamesPayload>,
    pub entry_created_at: DateTime<Utc>,
}

impl From<CsvUploadOperationRow> for CsvUploadOperation {
    fn from(row: CsvUploadOperationRow) -> Self {
        let Json(payload) = row.names_json;
        Self {
            id: row.id,
            kind: row.kind,
            created_at: row.created_at,
            source_filename: row.source_filename,
            names_count: payload.count,
            names: payload.names,
            entry_created_at: row.entry_created_at,
        }
    }
}

/// An operation with whichever child it has. Both children are `None`
/// when the child insert never happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationDetail {
    #[serde(flatten)]
    pub operation: Operation,
    pub single_text: Option<SingleTextEntry>,
    pub csv_upload: Option<CsvUploadEntry>,
}

#[derive(Debug, FromRow)]
pub(crate) struct OperationDetailRow {
    pub id: Uuid,
    pub kind: OperationKind,
    pub created_at: DateTime<Utc>,
    pub input_text: Option<String>,
    pub single_text_created_at: Option<DateTime<Utc>>,
    pub source_filename: Option<String>,
    pub names_json: Option<Json<NamesPayload>>,
    pub csv_upload_created_at: Option<DateTime<Utc>>,
}

impl From<OperationDetailRow> for OperationDetail {
    fn from(row: OperationDetailRow) -> Self {
        let single_text = match (row.input_text, row.single_text_created_at) {
            (Some(input_text), Some(created_at)) => Some(SingleTextEntry {
                id: row.id,
                input_text,
                created_at,
            }),
            _ => None,
        };

        let csv_upload = match (row.source_filename, row.names_json, row.csv_upload_created_at) {
            (Some(source_filename), Some(Json(payload)), Some(created_at)) => {
                Some(CsvUploadEntry {
                    id: row.id,
                    source_filename,
                    names_count: payload.count,
                    names: payload.names,
                    created_at,
                })
            }
            _ => None,
        };

        Self {
            operation: Operation {
                id: row.id,
                kind: row.kind,
                created_at: row.created_at,
            },
            single_text,
            csv_upload,
        }
    }
}

/// Record counts and a sample of the most recent rows of each table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub operation_count: i64,
    pub single_text_count: i64,
    pub csv_upload_count: i64,
    pub recent_operations: Vec<Operation>,
    pub recent_single_text: Vec<SingleTextEntry>,
    pub recent_csv_uploads: Vec<CsvUploadEntry>,
}
