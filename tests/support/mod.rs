// In-memory gateway shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matchmap::models::{Match, MatchId, SportTag, Team, VenueMarker};
use matchmap::{DataGateway, GatewayError};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned result of one remote call; `Err` carries the HTTP status to fail with
type Scripted<T> = Result<T, u16>;

pub struct ScriptedGateway {
    venues: Mutex<Scripted<Vec<VenueMarker>>>,
    matches: Mutex<Scripted<Vec<Match>>>,
    coordinates: Mutex<Scripted<Vec<VenueMarker>>>,
    sports: Mutex<Scripted<Vec<SportTag>>>,
    pub searches: AtomicUsize,
    pub last_ids: Mutex<Option<BTreeSet<MatchId>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            venues: Mutex::new(Ok(vec![])),
            matches: Mutex::new(Ok(vec![])),
            coordinates: Mutex::new(Ok(vec![])),
            sports: Mutex::new(Ok(vec![])),
            searches: AtomicUsize::new(0),
            last_ids: Mutex::new(None),
        }
    }

    pub fn with_venues(self, venues: Vec<VenueMarker>) -> Self {
        *self.venues.lock().unwrap() = Ok(venues);
        self
    }

    pub fn respond(&self, matches: Vec<Match>, coordinates: Vec<VenueMarker>, sports: Vec<SportTag>) {
        *self.matches.lock().unwrap() = Ok(matches);
        *self.coordinates.lock().unwrap() = Ok(coordinates);
        *self.sports.lock().unwrap() = Ok(sports);
    }

    pub fn fail_venues(&self, status: u16) {
        *self.venues.lock().unwrap() = Err(status);
    }

    pub fn fail_matches(&self, status: u16) {
        *self.matches.lock().unwrap() = Err(status);
    }

    pub fn fail_coordinates(&self, status: u16) {
        *self.coordinates.lock().unwrap() = Err(status);
    }

    pub fn fail_sports(&self, status: u16) {
        *self.sports.lock().unwrap() = Err(status);
    }
}

fn replay<T: Clone>(slot: &Mutex<Scripted<T>>, endpoint: &'static str) -> Result<T, GatewayError> {
    match &*slot.lock().unwrap() {
        Ok(value) => Ok(value.clone()),
        Err(status) => Err(GatewayError::Service {
            endpoint,
            status: *status,
        }),
    }
}

#[async_trait]
impl DataGateway for ScriptedGateway {
    async fn search_matches(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Match>, GatewayError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        replay(&self.matches, "matchs/dates")
    }

    async fn fetch_coordinates(
        &self,
        match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<VenueMarker>, GatewayError> {
        *self.last_ids.lock().unwrap() = Some(match_ids.clone());
        replay(&self.coordinates, "stadiums/coords")
    }

    async fn fetch_sports(
        &self,
        _match_ids: &BTreeSet<MatchId>,
    ) -> Result<Vec<SportTag>, GatewayError> {
        replay(&self.sports, "sports/games")
    }

    async fn fetch_all_venues(&self) -> Result<Vec<VenueMarker>, GatewayError> {
        replay(&self.venues, "stadiums")
    }
}

pub fn fixture(id: i64, stade: &str, home: &str, away: &str) -> Match {
    Match {
        id: MatchId::Number(id),
        date: None,
        competition: "Coupe de France".to_string(),
        stade: stade.to_string(),
        teams: vec![
            Team { name: home.to_string() },
            Team { name: away.to_string() },
        ],
        sport: None,
    }
}

pub fn tag(id: i64, sport: &str) -> SportTag {
    SportTag {
        match_id: MatchId::Number(id),
        sport: sport.to_string(),
    }
}
