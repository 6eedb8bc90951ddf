use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ApiFixturesResponse, Fixture};
use super::{FixtureSource, SportsApiError};

pub const DEFAULT_SPORTS_API_HOST: &str = "https://v3.football.api-sports.io";
const API_KEY_HEADER: &str = "x-apisports-key";

#[derive(Debug, Clone)]
pub struct ApiSportsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ApiSportsClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a client with its own connection pool and a request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SportsApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tipster/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(http, base_url, api_key))
    }

    /// Fetch every fixture played on `date` (YYYY-MM-DD).
    pub async fn get_fixtures_by_date(&self, date: &str) -> Result<Vec<Fixture>, SportsApiError> {
        self.get_fixtures(&[("date", date)]).await
    }

    /// Fetch one fixture by id.
    pub async fn get_fixture_by_id(&self, id: i64) -> Result<Option<Fixture>, SportsApiError> {
        let id_param = id.to_string();
        let fixtures = self.get_fixtures(&[("id", id_param.as_str())]).await?;

        match fixtures.into_iter().next() {
            Some(fixture) if fixture.id != id => Err(SportsApiError::Unexpected(format!(
                "asked for fixture {id}, got {}",
                fixture.id
            ))),
            other => Ok(other),
        }
    }

    async fn get_fixtures(&self, query: &[(&str, &str)]) -> Result<Vec<Fixture>, SportsApiError> {
        let url = format!("{}/fixtures", self.base_url);
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body: ApiFixturesResponse = resp.json().await?;
        Ok(body.response.into_iter().map(Fixture::from).collect())
    }
}

#[async_trait]
impl FixtureSource for ApiSportsClient {
    async fn fixtures_on(&self, date: &str) -> Result<Vec<Fixture>, SportsApiError> {
        self.get_fixtures_by_date(date).await
    }

    async fn fixture_by_id(&self, id: i64) -> Result<Option<Fixture>, SportsApiError> {
        self.get_fixture_by_id(id).await
    }
}
