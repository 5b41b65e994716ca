pub mod error;
pub mod model;
pub mod service;

pub use error::{AuditStoreError, LogFailure};
pub use model::{
    AuditSummary, CsvUploadEntry, CsvUploadOperation, NamesPayload, Operation, OperationDetail,
    OperationKind, SingleTextEntry, SingleTextOperation,
};
pub use service::RequestLogger;
