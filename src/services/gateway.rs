use crate::models::{FailureKind, Match, MatchId, SearchFailure, SportTag, VenueMarker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur when talking to the match API
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Service { endpoint: &'static str, status: u16 },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Network(_) => FailureKind::Network,
            GatewayError::Service { .. } => FailureKind::Service,
            GatewayError::InvalidResponse(_) => FailureKind::InvalidResponse,
        }
    }
}

impl From<&GatewayError> for SearchFailure {
    fn from(err: &GatewayError) -> Self {
        SearchFailure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// The four remote lookups the session depends on
///
/// Implementations do plain I/O: no retries, no caching, every failure
/// is returned to the caller.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Matches played between `start` and `end`, sport not yet attached
    async fn search_matches(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Match>, GatewayError>;

    /// Venues hosting the given matches
    async fn fetch_coordinates(
        &self,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<VenueMarker>, GatewayError>;

    async fn fetch_sports(
        &self,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<SportTag>, GatewayError>;

    /// Every known venue, shown before the first search
    async fn fetch_all_venues(&self) -> Result<Vec<VenueMarker>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_to_failure() {
        let err = GatewayError::Service {
            endpoint: "sports/games",
            status: 500,
        };
        let failure = SearchFailure::from(&err);

        assert_eq!(failure.kind, FailureKind::Service);
        assert_eq!(failure.message, "sports/games returned status 500");
    }
}
