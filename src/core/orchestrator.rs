use crate::core::correlation::{correlate, CorrelatedView};
use crate::core::session::{SelectionEvent, SessionState};
use crate::models::{MatchId, SearchFailure, SelectionState};
use crate::services::{DataGateway, GatewayError};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, warn};

/// How a call to [`ViewOrchestrator::search`] ended
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Completed(Arc<SessionState>),
    Failed(SearchFailure, Arc<SessionState>),
    /// A newer search started before this one finished; its result was dropped
    Superseded(Arc<SessionState>),
}

impl SearchOutcome {
    pub fn state(&self) -> &Arc<SessionState> {
        match self {
            SearchOutcome::Completed(state)
            | SearchOutcome::Failed(_, state)
            | SearchOutcome::Superseded(state) => state,
        }
    }
}

/// Owns the session and sequences the remote lookups
///
/// State lives in a single `Arc<SessionState>` slot. Transitions build a
/// new snapshot and swap it in; the lock is never held across an await.
/// Overlapping searches are tagged with a generation number and only the
/// most recent one may write its result.
pub struct ViewOrchestrator {
    gateway: Arc<dyn DataGateway>,
    state: RwLock<Arc<SessionState>>,
}

impl ViewOrchestrator {
    pub fn new(gateway: Arc<dyn DataGateway>, selection: SelectionState) -> Self {
        Self {
            gateway,
            state: RwLock::new(Arc::new(SessionState::new(selection))),
        }
    }

    /// Current session snapshot
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply `f` to the current state; `None` leaves it untouched
    fn transition<F>(&self, f: F) -> (Arc<SessionState>, bool)
    where
        F: FnOnce(&SessionState) -> Option<SessionState>,
    {
        let mut slot = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match f(slot.as_ref()) {
            Some(next) => {
                let next = Arc::new(next);
                *slot = Arc::clone(&next);
                (next, true)
            }
            None => (Arc::clone(&slot), false),
        }
    }

    /// Load every known venue so the map has something to show before a search
    pub async fn start(&self) -> Arc<SessionState> {
        info!("Loading all stadiums");

        match self.gateway.fetch_all_venues().await {
            Ok(venues) => {
                info!("Loaded {} stadiums", venues.len());
                self.transition(|s| Some(s.with_venues(venues))).0
            }
            Err(e) => {
                error!("Failed to load stadiums: {}", e);
                let failure = SearchFailure::from(&e);
                self.transition(|s| Some(s.venues_failed(failure))).0
            }
        }
    }

    /// Handle a date-picker or sport-select event; never fetches
    pub fn handle(&self, event: SelectionEvent) -> Arc<SessionState> {
        debug!("Selection event: {:?}", event);
        self.transition(|s| Some(s.apply(event))).0
    }

    /// Search the current date range and correlate the results
    pub async fn search(&self) -> SearchOutcome {
        let (started, _) = self.transition(|s| Some(s.begin_search()));
        let generation = started.generation;
        let start = started.selection.start_date;
        let end = started.selection.end_date;

        info!(generation, %start, %end, "Searching matches");

        match self.fetch_and_correlate(start, end).await {
            Ok(view) => {
                let gaps = view.gaps();
                if !gaps.is_empty() {
                    debug!(generation, ?gaps, "Correlation left unresolved records");
                }

                let found = view.len();
                let (state, applied) = self.transition(|s| s.complete_search(generation, view));
                if applied {
                    info!(generation, "Search completed with {} matches", found);
                    SearchOutcome::Completed(state)
                } else {
                    warn!(generation, current = state.generation, "Discarding stale search result");
                    SearchOutcome::Superseded(state)
                }
            }
            Err(e) => {
                let failure = SearchFailure::from(&e);
                let (state, applied) =
                    self.transition(|s| s.fail_search(generation, failure.clone()));
                if applied {
                    error!(generation, "Search failed: {}", e);
                    SearchOutcome::Failed(failure, state)
                } else {
                    warn!(generation, current = state.generation, "Discarding stale search failure: {}", e);
                    SearchOutcome::Superseded(state)
                }
            }
        }
    }

    async fn fetch_and_correlate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<CorrelatedView, GatewayError> {
        let matches = self.gateway.search_matches(start, end).await?;
        if matches.is_empty() {
            return Ok(CorrelatedView::default());
        }

        let match_ids: BTreeSet<MatchId> = matches.iter().map(|m| m.id.clone()).collect();

        let (coordinates, sports) = tokio::try_join!(
            self.gateway.fetch_coordinates(&match_ids),
            self.gateway.fetch_sports(&match_ids),
        )?;

        Ok(correlate(matches, coordinates, sports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionPhase;
    use crate::models::{Match, SportTag, VenueMarker};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingGateway {
        follow_up_calls: AtomicUsize,
    }

    #[async_trait]
    impl DataGateway for CountingGateway {
        async fn search_matches(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<Match>, GatewayError> {
            Ok(vec![])
        }

        async fn fetch_coordinates(
            &self,
            _match_ids: &BTreeSet<MatchId>,
        ) -> Result<Vec<VenueMarker>, GatewayError> {
            self.follow_up_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn fetch_sports(
            &self,
            _match_ids: &BTreeSet<MatchId>,
        ) -> Result<Vec<SportTag>, GatewayError> {
            self.follow_up_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn fetch_all_venues(&self) -> Result<Vec<VenueMarker>, GatewayError> {
            Ok(vec![VenueMarker::new("A", 2.35, 48.86)])
        }
    }

    #[tokio::test]
    async fn test_empty_search_skips_follow_up_lookups() {
        let gateway = Arc::new(CountingGateway::default());
        let orchestrator = ViewOrchestrator::new(gateway.clone(), SelectionState::default());

        let outcome = orchestrator.search().await;

        assert!(matches!(outcome, SearchOutcome::Completed(_)));
        assert_eq!(gateway.follow_up_calls.load(Ordering::SeqCst), 0);
        let state = orchestrator.snapshot();
        assert_eq!(state.phase, SessionPhase::Ready);
        assert!(state.search_completed());
        assert_eq!(state.projection().visible_markers().count(), 0);
    }

    #[tokio::test]
    async fn test_start_loads_fallback_venues() {
        let orchestrator =
            ViewOrchestrator::new(Arc::new(CountingGateway::default()), SelectionState::default());

        let state = orchestrator.start().await;

        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.projection().visible_markers().count(), 1);
    }

    #[test]
    fn test_handle_does_not_touch_phase() {
        let orchestrator =
            ViewOrchestrator::new(Arc::new(CountingGateway::default()), SelectionState::default());
        let sports: BTreeSet<String> = ["truc".to_string()].into();

        let state = orchestrator.handle(SelectionEvent::SportsChanged(sports.clone()));

        assert_eq!(state.selection.selected_sports, sports);
        assert_eq!(state.phase, SessionPhase::Idle);
    }
}
