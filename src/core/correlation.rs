use crate::models::{Match, SportTag, VenueMarker};
use std::collections::HashMap;

/// One searched match joined with its sport and venue
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedMatch {
    /// The match record, `sport` set from the sport lookup
    pub record: Match,
    pub marker: Option<VenueMarker>,
}

impl CorrelatedMatch {
    pub fn sport(&self) -> Option<&str> {
        self.record.sport.as_deref()
    }

    pub fn stade(&self) -> &str {
        &self.record.stade
    }
}

/// Counts of records that could not be joined
///
/// None of these are errors: a match without a marker is still listed,
/// a venue nobody plays at is simply never drawn after a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationGaps {
    pub matches_without_marker: usize,
    pub matches_without_sport: usize,
    pub unreferenced_venues: usize,
}

impl CorrelationGaps {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of joining one search's matches, coordinates and sport tags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelatedView {
    matches: Vec<CorrelatedMatch>,
    markers: Vec<VenueMarker>,
    sports: Vec<String>,
}

impl CorrelatedView {
    /// Matches in search order, one entry per fetched match
    pub fn matches(&self) -> &[CorrelatedMatch] {
        &self.matches
    }

    /// Distinct venue markers from the coordinate lookup
    pub fn markers(&self) -> &[VenueMarker] {
        &self.markers
    }

    /// Distinct sport labels, in the order the sport lookup returned them
    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn gaps(&self) -> CorrelationGaps {
        let matches_without_marker = self.matches.iter().filter(|m| m.marker.is_none()).count();
        let matches_without_sport = self.matches.iter().filter(|m| m.sport().is_none()).count();
        let unreferenced_venues = self
            .markers
            .iter()
            .filter(|marker| !self.matches.iter().any(|m| m.stade() == marker.stade))
            .count();

        CorrelationGaps {
            matches_without_marker,
            matches_without_sport,
            unreferenced_venues,
        }
    }
}

/// Join the three result sets of a single search
///
/// Markers are resolved by venue name and sports by match id; duplicate
/// keys keep the last value seen. Every input match yields exactly one
/// output entry, whether or not its lookups resolved.
pub fn correlate(
    matches: Vec<Match>,
    coordinates: Vec<VenueMarker>,
    sport_tags: Vec<SportTag>,
) -> CorrelatedView {
    // Venue name -> slot in `markers`, first appearance fixes the order
    let mut venue_slots: HashMap<String, usize> = HashMap::with_capacity(coordinates.len());
    let mut markers: Vec<VenueMarker> = Vec::with_capacity(coordinates.len());
    for marker in coordinates {
        match venue_slots.get(&marker.stade) {
            Some(&slot) => markers[slot] = marker,
            None => {
                venue_slots.insert(marker.stade.clone(), markers.len());
                markers.push(marker);
            }
        }
    }

    let mut sports: Vec<String> = Vec::new();
    let mut sport_by_match = HashMap::with_capacity(sport_tags.len());
    for tag in sport_tags {
        if !sports.contains(&tag.sport) {
            sports.push(tag.sport.clone());
        }
        sport_by_match.insert(tag.match_id, tag.sport);
    }

    let matches = matches
        .into_iter()
        .map(|mut record| {
            record.sport = sport_by_match.get(&record.id).cloned();
            let marker = venue_slots
                .get(&record.stade)
                .map(|&slot| markers[slot].clone());
            CorrelatedMatch { record, marker }
        })
        .collect();

    CorrelatedView {
        matches,
        markers,
        sports,
    }
}
