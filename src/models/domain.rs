use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Match identifier as issued by the match API
///
/// The API hands out numeric ids but nothing guarantees it, so both JSON
/// numbers and strings are accepted and sent back in the same JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchId::Number(n) => write!(f, "{}", n),
            MatchId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MatchId {
    fn from(value: i64) -> Self {
        MatchId::Number(value)
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        MatchId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
}

/// A single fixture returned by the date-range search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Kick-off, when the API sends something that reads as a date
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub competition: String,
    pub stade: String,
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Only meaningful once the sport lookup has been correlated
    #[serde(default)]
    pub sport: Option<String>,
}

impl Match {
    pub fn home(&self) -> Option<&str> {
        self.teams.first().map(|t| t.name.as_str())
    }

    pub fn away(&self) -> Option<&str> {
        self.teams.get(1).map(|t| t.name.as_str())
    }

    /// "Home VS Away", the way list entries and popups title a fixture
    pub fn fixture_label(&self) -> String {
        format!(
            "{} VS {}",
            self.home().unwrap_or("?"),
            self.away().unwrap_or("?")
        )
    }
}

/// Accept RFC 3339 instants, naive date-times and bare dates; anything else is `None`
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Raw planar coordinate pair as served by the stadium endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub x: f64,
    pub y: f64,
}

/// Stadium record as served by `/stadiums` and `/stadiums/coords`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StadiumRecord {
    pub stade: String,
    pub place: Place,
}

/// A venue positioned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueMarker {
    pub stade: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl VenueMarker {
    pub fn new(stade: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            stade: stade.into(),
            longitude,
            latitude,
        }
    }

    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }

    /// Position pair in the order the map widget expects
    pub fn display_position(&self, order: AxisOrder) -> [f64; 2] {
        match order {
            AxisOrder::LatLng => [self.latitude, self.longitude],
            AxisOrder::LngLat => [self.longitude, self.latitude],
        }
    }
}

impl From<StadiumRecord> for VenueMarker {
    fn from(record: StadiumRecord) -> Self {
        // x is the easting, y the northing
        Self {
            stade: record.stade,
            longitude: record.place.x,
            latitude: record.place.y,
        }
    }
}

/// Order of the two components of a rendered marker position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// `[latitude, longitude]`, what Leaflet-style maps consume
    #[default]
    LatLng,
    /// `[longitude, latitude]`
    LngLat,
}

/// Sport label attached to one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportTag {
    #[serde(rename = "matchId")]
    pub match_id: MatchId,
    pub sport: String,
}

/// User-controlled search window and sport filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    /// Empty means no filter
    #[serde(rename = "selectedSports")]
    pub selected_sports: BTreeSet<String>,
}

impl SelectionState {
    /// Fresh selection covering `now..=now` with no sport filter
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_date: now,
            end_date: now,
            selected_sports: BTreeSet::new(),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

/// Category of a failed remote call, as reported to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Service,
    InvalidResponse,
}

/// Why the last search (or the startup venue load) failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
