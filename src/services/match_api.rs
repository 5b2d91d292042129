use crate::models::{Match, MatchId, MatchIdsRequest, SportTag, StadiumRecord, VenueMarker};
use crate::services::gateway::{DataGateway, GatewayError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::time::Duration;

const MATCHES_BY_DATES: &str = "matchs/dates";
const STADIUM_COORDS: &str = "stadiums/coords";
const STADIUMS: &str = "stadiums";
const SPORTS_BY_GAMES: &str = "sports/games";

/// Render an instant the way the match API expects it (`2024-06-01T00:00:00.000Z`)
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// HTTP client for the match, stadium and sport endpoints
pub struct MatchApiClient {
    base_url: String,
    client: Client,
}

impl MatchApiClient {
    /// Create a new client rooted at `base_url` (e.g. `http://localhost:3001/api`)
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_ids<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<T, GatewayError> {
        let body = MatchIdsRequest {
            match_ids: match_ids.iter().cloned().collect(),
        };

        tracing::debug!("POST {} with {} match ids", endpoint, body.match_ids.len());

        let response = self.client.post(self.url(endpoint)).json(&body).send().await?;

        decode(endpoint, response).await
    }
}

/// Check the status and parse the body of a match API response
async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("{} failed: {} - {}", endpoint, status, body);
        return Err(GatewayError::Service {
            endpoint,
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        GatewayError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e))
    })
}

#[async_trait]
impl DataGateway for MatchApiClient {
    async fn search_matches(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Match>, GatewayError> {
        let url = format!(
            "{}?startDate={}&endDate={}",
            self.url(MATCHES_BY_DATES),
            urlencoding::encode(&format_instant(start)),
            urlencoding::encode(&format_instant(end)),
        );

        tracing::debug!("Searching matches: {}", url);

        let response = self.client.get(&url).send().await?;
        let matches: Vec<Match> = decode(MATCHES_BY_DATES, response).await?;

        tracing::debug!("Found {} matches", matches.len());

        Ok(matches)
    }

    async fn fetch_coordinates(
        &self,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<VenueMarker>, GatewayError> {
        let records: Vec<StadiumRecord> = self.post_ids(STADIUM_COORDS, match_ids).await?;
        Ok(records.into_iter().map(VenueMarker::from).collect())
    }

    async fn fetch_sports(
        &self,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<SportTag>, GatewayError> {
        self.post_ids(SPORTS_BY_GAMES, match_ids).await
    }

    async fn fetch_all_venues(&self) -> Result<Vec<VenueMarker>, GatewayError> {
        let response = self.client.get(self.url(STADIUMS)).send().await?;
        let records: Vec<StadiumRecord> = decode(STADIUMS, response).await?;

        tracing::debug!("Loaded {} stadiums", records.len());

        Ok(records.into_iter().map(VenueMarker::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_match_api_client_creation() {
        let client =
            MatchApiClient::new("http://localhost:3001/api/".to_string(), Duration::from_secs(5))
                .unwrap();

        assert_eq!(client.base_url(), "http://localhost:3001/api/");
        assert_eq!(client.url(STADIUMS), "http://localhost:3001/api/stadiums");
    }

    #[test]
    fn test_format_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(format_instant(instant), "2024-06-01T00:00:00.000Z");
    }
}
