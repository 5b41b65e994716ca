use crate::domain::enrichment::{CountryProbability, Lookup};
use async_trait::async_trait;

/// Vendor giving the probable countries of a name.
/// Implementations never fail; any problem is reported as `Lookup::Unavailable`.
#[async_trait]
pub trait EthnicityRepository: Send + Sync {
    /// Countries sorted by descending probability, probabilities in percent
    async fn country_probabilities(&self, name: &str) -> Lookup<Vec<CountryProbability>>;
}

/// Vendor giving the origin of a name.
/// Implementations never fail; any problem is reported as `Lookup::Unavailable`.
#[async_trait]
pub trait OriginRepository: Send + Sync {
    async fn origin(&self, name: &str) -> Lookup<String>;
}
