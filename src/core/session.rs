use crate::core::correlation::CorrelatedView;
use crate::core::projector::Projection;
use crate::models::{SearchFailure, SelectionState, VenueMarker};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Where the session stands with respect to searching
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// No search attempted yet; all known venues are shown
    Idle,
    Searching { generation: u64 },
    Ready,
    /// The last search (or the startup venue load) failed; earlier data is kept
    Failed { error: SearchFailure },
}

/// A user interaction with the date pickers or the sport select
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    StartDateChanged(DateTime<Utc>),
    EndDateChanged(DateTime<Utc>),
    /// Both bounds at once, applied as one transition
    DateRangeChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    SportsChanged(BTreeSet<String>),
}

/// Immutable snapshot of the whole session
///
/// Every transition returns a new value; loaded data is shared through
/// `Arc`s so snapshots stay cheap to produce.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub selection: SelectionState,
    pub phase: SessionPhase,
    /// Every known venue, loaded once at startup
    pub venues: Arc<Vec<VenueMarker>>,
    /// Result of the last completed search
    pub view: Option<Arc<CorrelatedView>>,
    /// Generation of the most recently started search
    pub generation: u64,
}

impl SessionState {
    pub fn new(selection: SelectionState) -> Self {
        Self {
            selection,
            phase: SessionPhase::Idle,
            venues: Arc::new(Vec::new()),
            view: None,
            generation: 0,
        }
    }

    pub fn apply(&self, event: SelectionEvent) -> Self {
        let mut selection = self.selection.clone();
        match event {
            SelectionEvent::StartDateChanged(date) => selection.start_date = date,
            SelectionEvent::EndDateChanged(date) => selection.end_date = date,
            SelectionEvent::DateRangeChanged { start, end } => {
                selection.start_date = start;
                selection.end_date = end;
            }
            SelectionEvent::SportsChanged(sports) => selection.selected_sports = sports,
        }

        Self {
            selection,
            ..self.clone()
        }
    }

    pub fn with_venues(&self, venues: Vec<VenueMarker>) -> Self {
        Self {
            venues: Arc::new(venues),
            ..self.clone()
        }
    }

    /// Startup venue load failed; only an untouched session reports it
    pub fn venues_failed(&self, error: SearchFailure) -> Self {
        let phase = match self.phase {
            SessionPhase::Idle => SessionPhase::Failed { error },
            _ => self.phase.clone(),
        };

        Self {
            phase,
            ..self.clone()
        }
    }

    /// Start a new search, superseding any search still in flight
    pub fn begin_search(&self) -> Self {
        let generation = self.generation + 1;
        Self {
            phase: SessionPhase::Searching { generation },
            generation,
            ..self.clone()
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Install a finished search, or `None` if a newer one was started since
    pub fn complete_search(&self, generation: u64, view: CorrelatedView) -> Option<Self> {
        if !self.is_current(generation) {
            return None;
        }

        Some(Self {
            phase: SessionPhase::Ready,
            view: Some(Arc::new(view)),
            ..self.clone()
        })
    }

    /// Record a failed search, keeping whatever was displayed before
    pub fn fail_search(&self, generation: u64, error: SearchFailure) -> Option<Self> {
        if !self.is_current(generation) {
            return None;
        }

        Some(Self {
            phase: SessionPhase::Failed { error },
            ..self.clone()
        })
    }

    pub fn search_completed(&self) -> bool {
        self.view.is_some()
    }

    pub fn last_error(&self) -> Option<&SearchFailure> {
        match &self.phase {
            SessionPhase::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn projection(&self) -> Projection<'_> {
        Projection::new(
            self.view.as_deref(),
            &self.venues,
            &self.selection.selected_sports,
        )
    }
}
