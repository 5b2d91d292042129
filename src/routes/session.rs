use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MapSettings;
use crate::core::{SearchOutcome, SelectionEvent, SessionPhase, SessionState, ViewOrchestrator};
use crate::models::{
    DateRangeRequest, ErrorResponse, HealthResponse, MapView, MarkerEntry, MatchEntry, PopupEntry,
    PopupFixture, SportOptions, SportsSelectionRequest, ViewResponse,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ViewOrchestrator>,
    pub map: MapSettings,
}

/// Configure all session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/view", web::get().to(current_view))
        .route("/selection/dates", web::put().to(update_dates))
        .route("/selection/sports", web::put().to(update_sports))
        .route("/search", web::post().to(search));
}

/// Build what the widgets render from a session snapshot
pub fn render_view(state: &SessionState, map: &MapSettings) -> ViewResponse {
    let projection = state.projection();

    let matches = projection
        .visible_matches()
        .map(|m| MatchEntry {
            id: m.record.id.clone(),
            date: m.record.date,
            stade: m.record.stade.clone(),
            competition: m.record.competition.clone(),
            teams: m.record.teams.iter().map(|t| t.name.clone()).collect(),
            sport: m.record.sport.clone(),
            has_marker: m.marker.is_some(),
        })
        .collect();

    let markers = projection
        .visible_markers()
        .map(|marker| MarkerEntry {
            stade: marker.stade.clone(),
            longitude: marker.longitude,
            latitude: marker.latitude,
            position: marker.display_position(map.axis_order),
        })
        .collect();

    let popups = projection
        .popups()
        .into_iter()
        .map(|popup| PopupEntry {
            stade: popup.marker.stade.clone(),
            fixtures: popup
                .fixtures
                .iter()
                .map(|m| PopupFixture {
                    id: m.record.id.clone(),
                    label: m.record.fixture_label(),
                    competition: m.record.competition.clone(),
                })
                .collect(),
        })
        .collect();

    let phase = match state.phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Searching { .. } => "searching",
        SessionPhase::Ready => "ready",
        SessionPhase::Failed { .. } => "failed",
    };

    ViewResponse {
        phase: phase.to_string(),
        search_completed: state.search_completed(),
        last_error: state.last_error().cloned(),
        selection: state.selection.clone(),
        matches,
        markers,
        popups,
        sports: SportOptions {
            available: projection.sport_options().to_vec(),
            selected: projection.selected_options().into_iter().map(String::from).collect(),
        },
        map: MapView {
            center: map.center(),
            zoom: map.zoom,
            axis_order: map.axis_order,
            tile_url: map.tile_url.clone(),
            attribution: map.attribution.clone(),
            bounds: projection.bounds(),
        },
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Current view endpoint
///
/// GET /api/v1/view
async fn current_view(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.orchestrator.snapshot();
    HttpResponse::Ok().json(render_view(&snapshot, &state.map))
}

/// Date-picker endpoint
///
/// PUT /api/v1/selection/dates
///
/// Request body:
/// ```json
/// {
///   "startDate": "2024-06-01T00:00:00.000Z",
///   "endDate": "2024-06-02T00:00:00.000Z"
/// }
/// ```
async fn update_dates(
    state: web::Data<AppState>,
    req: web::Json<DateRangeRequest>,
) -> impl Responder {
    let DateRangeRequest { start_date, end_date } = req.into_inner();

    let event = match (start_date, end_date) {
        (Some(start), Some(end)) => Some(SelectionEvent::DateRangeChanged { start, end }),
        (Some(start), None) => Some(SelectionEvent::StartDateChanged(start)),
        (None, Some(end)) => Some(SelectionEvent::EndDateChanged(end)),
        (None, None) => None,
    };

    let snapshot = match event {
        Some(event) => state.orchestrator.handle(event),
        None => state.orchestrator.snapshot(),
    };
    HttpResponse::Ok().json(render_view(&snapshot, &state.map))
}

/// Sport filter endpoint
///
/// PUT /api/v1/selection/sports
///
/// Request body:
/// ```json
/// { "sports": ["truc", "machin"] }
/// ```
async fn update_sports(
    state: web::Data<AppState>,
    req: web::Json<SportsSelectionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for sports selection: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let sports = req.into_inner().sports.into_iter().collect();
    let snapshot = state.orchestrator.handle(SelectionEvent::SportsChanged(sports));

    HttpResponse::Ok().json(render_view(&snapshot, &state.map))
}

/// Search endpoint
///
/// POST /api/v1/search
async fn search(state: web::Data<AppState>) -> impl Responder {
    match state.orchestrator.search().await {
        SearchOutcome::Failed(failure, _) => HttpResponse::BadGateway().json(ErrorResponse {
            error: "Search failed".to_string(),
            message: failure.message,
            status_code: 502,
        }),
        outcome => HttpResponse::Ok().json(render_view(outcome.state(), &state.map)),
    }
}
