use serde::{Deserialize, Serialize};

/// Minimum probability (percent) for the top ethnicity country to stand in as origin
pub const ORIGIN_FALLBACK_THRESHOLD: f64 = 25.0;
pub const ORIGIN_NOT_AVAILABLE: &str = "Not available";

/// Outcome of one best-effort vendor lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Unavailable(String),
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Unavailable(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryProbability {
    pub country: String,
    /// Percentage in `0.0..=100.0`
    pub probability: f64,
}

/// Request for POST /api/enrich
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrichRequest {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SourceState {
    Available,
    Unavailable,
}

impl<T> From<&Lookup<T>> for SourceState {
    fn from(lookup: &Lookup<T>) -> Self {
        if lookup.is_found() {
            SourceState::Available
        } else {
            SourceState::Unavailable
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceStatus {
    pub origin: SourceState,
    pub ethnicity: SourceState,
}

/// Response for POST /api/enrich
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentResult {
    pub name: String,
    pub origin: String,
    pub ethnicity: Vec<CountryProbability>,
    pub sources: SourceStatus,
}

/// Origin label for a name.
///
/// The origin vendor's answer wins. Without one, the most probable ethnicity
/// country is used as `Likely <country>` when it reaches the threshold.
pub fn resolve_origin(origin: &Lookup<String>, ethnicity: &Lookup<Vec<CountryProbability>>) -> String {
    if let Some(origin) = origin.found().map(|o| o.trim()).filter(|o| !o.is_empty()) {
        return origin.to_string();
    }

    ethnicity
        .found()
        .and_then(|countries| {
            countries
                .iter()
                .max_by(|a, b| a.probability.total_cmp(&b.probability))
        })
        .filter(|top| top.probability >= ORIGIN_FALLBACK_THRESHOLD)
        .map(|top| format!("Likely {}", top.country))
        .unwrap_or_else(|| ORIGIN_NOT_AVAILABLE.to_string())
}
