use crate::graphql::error::FetchError;
use crate::model::DatasetSnapshot;

pub(crate) mod client;
pub use client::GraphqlClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StatsSource: Send + Sync {
    /// Human-readable description of where the stats come from.
    fn describe(&self) -> String;

    /// Fetch the collection statistics.
    ///
    /// `Ok(None)` means the endpoint answered without a `data` payload.
    async fn fetch_snapshot(&self) -> Result<Option<DatasetSnapshot>, FetchError>;
}
