// Core session exports
pub mod bounds;
pub mod correlation;
pub mod orchestrator;
pub mod projector;
pub mod session;

pub use bounds::marker_bounds;
pub use correlation::{correlate, CorrelatedMatch, CorrelatedView, CorrelationGaps};
pub use orchestrator::{SearchOutcome, ViewOrchestrator};
pub use projector::{matches_sport_filter, MarkerPopup, Projection, VisibleView};
pub use session::{SelectionEvent, SessionPhase, SessionState};
