pub mod error;
pub mod model;
pub mod service;

pub use error::EnrichmentError;
pub use model::{
    resolve_origin, CountryProbability, EnrichRequest, EnrichmentResult, Lookup, SourceState,
    SourceStatus, ORIGIN_FALLBACK_THRESHOLD, ORIGIN_NOT_AVAILABLE,
};
pub use service::{EnrichmentService, EnrichmentServiceApi};
