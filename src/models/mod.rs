// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AxisOrder, BoundingBox, FailureKind, Match, MatchId, Place, SearchFailure, SelectionState, SportTag, StadiumRecord, Team, VenueMarker};
pub use requests::{DateRangeRequest, MatchIdsRequest, SportsSelectionRequest};
pub use responses::{ErrorResponse, HealthResponse, MapView, MarkerEntry, MatchEntry, PopupEntry, PopupFixture, SportOptions, ViewResponse};
