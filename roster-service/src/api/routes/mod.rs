use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::api::state::AppState;
use crate::presentation::{
    DayShortfallSerialize, DiagnosisSerialize, RosterRowSerialize, RosterSerialize,
};
use shared::{CoreShift, CoverageShift, RequestKind, ShiftStatus};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster Service API",
        version = "1.0.0",
        description = "Constraint-based monthly nurse roster generation API"
    ),
    paths(
        crate::api::handlers::roster_handlers::create_roster,
        crate::api::handlers::roster_handlers::health,
    ),
    components(schemas(
        crate::api::requests::CreateRosterRequest,
        crate::domain::problem::ShiftRequest,
        crate::domain::problem::FixRequest,
        crate::domain::problem::StaffingOverride,
        RosterSerialize,
        RosterRowSerialize,
        DiagnosisSerialize,
        DayShortfallSerialize,
        ShiftStatus,
        CoreShift,
        CoverageShift,
        RequestKind,
    ))
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new().route("/rosters", post(handlers::create_roster));

    Router::new()
        .nest("/api/v1", api_router)
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
