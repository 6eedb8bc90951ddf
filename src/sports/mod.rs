pub mod client;
pub mod matching;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::ApiSportsClient;
pub use matching::{find_fixture, lookup_fixture, normalize_team_name};
pub use types::Fixture;

#[derive(Debug, Error)]
pub enum SportsApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Where fixtures come from. `ApiSportsClient` in production, stubs in tests.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// All fixtures scheduled on `date`.
    async fn fixtures_on(&self, date: &str) -> Result<Vec<Fixture>, SportsApiError>;

    /// A single fixture by its API id, `None` if the API does not know it.
    async fn fixture_by_id(&self, id: i64) -> Result<Option<Fixture>, SportsApiError>;
}
