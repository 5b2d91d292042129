use crate::core::bounds::marker_bounds;
use crate::core::correlation::{CorrelatedMatch, CorrelatedView};
use crate::models::{BoundingBox, VenueMarker};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Check whether a correlated match passes the sport filter
///
/// An empty selection means "no filter". Matches whose sport never
/// resolved only pass when no filter is active.
#[inline]
pub fn matches_sport_filter(m: &CorrelatedMatch, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || m.sport().is_some_and(|sport| selected.contains(sport))
}

/// Popup content for one visible marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup<'a> {
    pub marker: &'a VenueMarker,
    /// Visible matches hosted at this venue; empty before any search
    pub fixtures: Vec<&'a CorrelatedMatch>,
}

/// Owned copy of what is currently displayed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleView {
    pub matches: Vec<CorrelatedMatch>,
    pub markers: Vec<VenueMarker>,
}

/// The displayed subset of a session's data under a sport selection
///
/// Everything here is computed on demand from borrowed state, so a
/// projection can never outlive or disagree with the data it came from.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    view: Option<&'a CorrelatedView>,
    fallback_venues: &'a [VenueMarker],
    selected: &'a BTreeSet<String>,
}

impl<'a> Projection<'a> {
    /// `view` is `None` until a search has completed, in which case the
    /// startup venues are shown instead.
    pub fn new(
        view: Option<&'a CorrelatedView>,
        fallback_venues: &'a [VenueMarker],
        selected: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            view,
            fallback_venues,
            selected,
        }
    }

    pub fn visible_matches(&self) -> impl Iterator<Item = &'a CorrelatedMatch> + 'a {
        let selected = self.selected;
        self.view
            .into_iter()
            .flat_map(|view| view.matches().iter())
            .filter(move |m| matches_sport_filter(m, selected))
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &'a VenueMarker> + 'a {
        let (source, venues) = match self.view {
            Some(view) => {
                let venues: HashSet<&'a str> = self.visible_matches().map(|m| m.stade()).collect();
                (view.markers(), Some(venues))
            }
            None => (self.fallback_venues, None),
        };

        source.iter().filter(move |marker| match &venues {
            Some(venues) => venues.contains(marker.stade.as_str()),
            None => true,
        })
    }

    /// Popups keyed by venue name, one per visible marker
    pub fn popups(&self) -> Vec<MarkerPopup<'a>> {
        let mut by_venue: HashMap<&'a str, Vec<&'a CorrelatedMatch>> = HashMap::new();
        for m in self.visible_matches() {
            by_venue.entry(m.stade()).or_default().push(m);
        }

        self.visible_markers()
            .map(|marker| MarkerPopup {
                marker,
                fixtures: by_venue.get(marker.stade.as_str()).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Sport labels the filter can offer
    pub fn sport_options(&self) -> &'a [String] {
        self.view.map(|view| view.sports()).unwrap_or(&[])
    }

    /// Selected labels that are actually on offer
    pub fn selected_options(&self) -> Vec<&'a str> {
        self.sport_options()
            .iter()
            .filter(|sport| self.selected.contains(sport.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        marker_bounds(self.visible_markers())
    }

    pub fn search_completed(&self) -> bool {
        self.view.is_some()
    }

    pub fn to_visible(&self) -> VisibleView {
        VisibleView {
            matches: self.visible_matches().cloned().collect(),
            markers: self.visible_markers().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::correlation::correlate;
    use crate::models::{Match, MatchId, SportTag, Team};

    fn fixture(id: i64, stade: &str) -> Match {
        Match {
            id: MatchId::Number(id),
            date: None,
            competition: "Coupe".to_string(),
            stade: stade.to_string(),
            teams: vec![
                Team { name: "Rouge".to_string() },
                Team { name: "Bleu".to_string() },
            ],
            sport: None,
        }
    }

    fn sample_view() -> CorrelatedView {
        correlate(
            vec![fixture(1, "A"), fixture(2, "B"), fixture(3, "A"), fixture(4, "C")],
            vec![
                VenueMarker::new("A", 2.35, 48.86),
                VenueMarker::new("B", 4.83, 45.76),
                VenueMarker::new("D", 5.37, 43.30),
            ],
            vec![
                SportTag { match_id: MatchId::Number(1), sport: "truc".to_string() },
                SportTag { match_id: MatchId::Number(2), sport: "machin".to_string() },
                SportTag { match_id: MatchId::Number(3), sport: "truc".to_string() },
            ],
        )
    }

    fn selection(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_selection_shows_everything() {
        let view = sample_view();
        let selected = BTreeSet::new();
        let projection = Projection::new(Some(&view), &[], &selected);

        let ids: Vec<_> = projection.visible_matches().map(|m| m.record.id.clone()).collect();
        assert_eq!(ids.len(), 4);

        // "D" hosts nothing, "C" has no coordinates
        let venues: Vec<_> = projection.visible_markers().map(|m| m.stade.as_str()).collect();
        assert_eq!(venues, vec!["A", "B"]);
    }

    #[test]
    fn test_sport_filter_subset() {
        let view = sample_view();
        let selected = selection(&["truc"]);
        let projection = Projection::new(Some(&view), &[], &selected);

        let matches: Vec<_> = projection.visible_matches().collect();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.sport() == Some("truc")));

        let venues: Vec<_> = projection.visible_markers().map(|m| m.stade.as_str()).collect();
        assert_eq!(venues, vec!["A"]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let view = sample_view();
        let selected = selection(&["machin"]);

        let first = Projection::new(Some(&view), &[], &selected).to_visible();
        let second = Projection::new(Some(&view), &[], &selected).to_visible();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_sport_hides_everything_after_search() {
        let view = sample_view();
        let fallback = vec![VenueMarker::new("Z", 0.0, 0.0)];
        let selected = selection(&["inconnu"]);
        let projection = Projection::new(Some(&view), &fallback, &selected);

        assert_eq!(projection.visible_matches().count(), 0);
        assert_eq!(projection.visible_markers().count(), 0);
        assert!(projection.bounds().is_none());
    }

    #[test]
    fn test_fallback_venues_before_any_search() {
        let fallback = vec![VenueMarker::new("A", 2.35, 48.86), VenueMarker::new("Z", 0.0, 0.0)];
        let selected = selection(&["truc"]);
        let projection = Projection::new(None, &fallback, &selected);

        assert_eq!(projection.visible_matches().count(), 0);
        assert_eq!(projection.visible_markers().count(), 2);
        assert!(projection.popups().iter().all(|p| p.fixtures.is_empty()));
        assert!(!projection.search_completed());
    }

    #[test]
    fn test_popups_group_fixtures_by_venue() {
        let view = sample_view();
        let selected = BTreeSet::new();
        let projection = Projection::new(Some(&view), &[], &selected);

        let popups = projection.popups();
        assert_eq!(popups.len(), 2);
        assert_eq!(popups[0].marker.stade, "A");
        let ids: Vec<_> = popups[0].fixtures.iter().map(|m| m.record.id.clone()).collect();
        assert_eq!(ids, vec![MatchId::Number(1), MatchId::Number(3)]);
        assert_eq!(popups[1].fixtures.len(), 1);
    }

    #[test]
    fn test_selected_options_ignore_unknown_labels() {
        let view = sample_view();
        let selected = selection(&["machin", "inconnu"]);
        let projection = Projection::new(Some(&view), &[], &selected);

        assert_eq!(projection.sport_options(), &["truc".to_string(), "machin".to_string()]);
        assert_eq!(projection.selected_options(), vec!["machin"]);
    }
}
