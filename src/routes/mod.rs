// Route exports
pub mod session;

use actix_web::web;

pub use session::{render_view, AppState};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(session::configure),
    );
}
