//! Matchmap - sporting fixtures on a map
//!
//! This library searches matches over a date range, correlates them with
//! their stadium coordinates and sports, and projects the result through
//! a sport filter for map and list display.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{correlate, CorrelatedView, Projection, SearchOutcome, SelectionEvent, SessionState, ViewOrchestrator};
pub use models::{Match, MatchId, SelectionState, SportTag, VenueMarker};
pub use services::{DataGateway, GatewayError, MatchApiClient};
