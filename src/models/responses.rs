use serde::{Deserialize, Serialize};
use crate::models::domain::{AxisOrder, BoundingBox, MatchId, SearchFailure, SelectionState};

/// One entry of the visible match list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub id: MatchId,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub stade: String,
    pub competition: String,
    pub teams: Vec<String>,
    pub sport: Option<String>,
    #[serde(rename = "hasMarker")]
    pub has_marker: bool,
}

/// One visible map marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub stade: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Position pair in the configured axis order
    pub position: [f64; 2],
}

/// Fixture line shown in a marker popup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupFixture {
    pub id: MatchId,
    pub label: String,
    pub competition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupEntry {
    pub stade: String,
    pub fixtures: Vec<PopupFixture>,
}

/// Options and current value of the sport multi-select
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportOptions {
    pub available: Vec<String>,
    pub selected: Vec<String>,
}

/// Static map settings plus the frame of the visible markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: f64,
    #[serde(rename = "axisOrder")]
    pub axis_order: AxisOrder,
    #[serde(rename = "tileUrl")]
    pub tile_url: String,
    pub attribution: String,
    pub bounds: Option<BoundingBox>,
}

/// Everything the map, list and filter widgets render from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    /// `idle`, `searching`, `ready` or `failed`
    pub phase: String,
    #[serde(rename = "searchCompleted")]
    pub search_completed: bool,
    #[serde(rename = "lastError")]
    pub last_error: Option<SearchFailure>,
    pub selection: SelectionState,
    pub matches: Vec<MatchEntry>,
    pub markers: Vec<MarkerEntry>,
    pub popups: Vec<PopupEntry>,
    pub sports: SportOptions,
    pub map: MapView,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
