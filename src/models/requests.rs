use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::MatchId;

/// Date-picker update; either bound may be sent on its own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeRequest {
    #[serde(rename = "startDate", default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Sport multi-select update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SportsSelectionRequest {
    #[validate(length(max = 256), custom(function = "validate_sport_labels"))]
    #[serde(default)]
    pub sports: Vec<String>,
}

fn validate_sport_labels(sports: &Vec<String>) -> Result<(), ValidationError> {
    if sports.iter().any(|s| s.trim().is_empty()) {
        return Err(ValidationError::new("blank_sport_label"));
    }
    Ok(())
}

/// Body of the coordinate and sport lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchIdsRequest {
    #[serde(rename = "matchIds")]
    pub match_ids: Vec<MatchId>,
}
