use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ApiResponse, DomainError};

use crate::api::requests::CreateRosterRequest;
use crate::api::state::AppState;
use crate::domain::calendar::MonthCalendar;
use crate::domain::engine::SolveOutcome;
use crate::presentation::{DiagnosisSerialize, RosterSerialize};

/// Solve one month's roster
#[utoipa::path(
    post,
    path = "/api/v1/rosters",
    request_body = CreateRosterRequest,
    responses(
        (status = 200, description = "Roster solved", body = RosterSerialize),
        (status = 400, description = "Invalid input"),
        (status = 422, description = "No feasible roster", body = DiagnosisSerialize),
        (status = 500, description = "Internal server error")
    ),
    tag = "rosters"
)]
pub async fn create_roster(
    State(state): State<AppState>,
    Json(request): Json<CreateRosterRequest>,
) -> Result<Response, (StatusCode, String)> {
    let problem = request.into_problem();
    let engine = state.engine.clone();

    // The solver blocks for up to its time budget; keep it off the runtime.
    let (problem, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = engine.solve(&problem);
        (problem, outcome)
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match outcome {
        Ok(SolveOutcome::Roster { roster, warnings }) => {
            let calendar =
                MonthCalendar::new(problem.year, problem.month, problem.days, &problem.holidays)
                    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            let body = RosterSerialize::render(
                &roster,
                &calendar,
                &state.engine.config().policy,
                warnings,
            );
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        Ok(SolveOutcome::Infeasible { diagnosis }) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(DiagnosisSerialize::from(&diagnosis)),
        )
            .into_response()),
        Err(DomainError::InvalidInput(message)) => Err((StatusCode::BAD_REQUEST, message)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::success("UP", ()))
}
