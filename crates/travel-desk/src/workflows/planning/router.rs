use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::booking::BookingLedger;
use super::domain::TripRequestPayload;
use super::report::{PlanId, TripPlan};
use super::repository::PlanRepository;
use super::service::TripPlanningService;
use crate::error::AppError;

const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Router builder exposing trip planning, booking, and policy endpoints.
pub fn planning_router<R, L>(service: Arc<TripPlanningService<R, L>>) -> Router
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    Router::new()
        .route("/api/v1/trips/plans", post(plan_handler::<R, L>))
        .route("/api/v1/trips/plans/:plan_id", get(plan_status_handler::<R, L>))
        .route(
            "/api/v1/trips/plans/:plan_id/bookings",
            post(booking_handler::<R, L>),
        )
        .route("/api/v1/trips/compliance", post(compliance_handler::<R, L>))
        .route(
            "/api/v1/traveler/preferences",
            get(preferences_handler::<R, L>),
        )
        .route("/api/v1/policy/search", get(policy_search_handler::<R, L>))
        .with_state(service)
}

/// Plan payload returned over HTTP, with the rendered report alongside.
#[derive(Debug, Serialize)]
pub struct TripPlanView {
    #[serde(flatten)]
    pub plan: TripPlan,
    pub summary_markdown: String,
}

impl From<TripPlan> for TripPlanView {
    fn from(plan: TripPlan) -> Self {
        let summary_markdown = plan.to_markdown();
        Self {
            plan,
            summary_markdown,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub package: usize,
}

#[derive(Debug, Deserialize)]
pub struct PolicySearchParams {
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub(crate) async fn plan_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
    axum::Json(payload): axum::Json<TripRequestPayload>,
) -> Result<Response, AppError>
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let plan = service.plan(payload)?;
    Ok((StatusCode::CREATED, axum::Json(TripPlanView::from(plan))).into_response())
}

pub(crate) async fn plan_status_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
    Path(plan_id): Path<String>,
) -> Result<Response, AppError>
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let plan = service.get(&PlanId(plan_id))?;
    Ok((StatusCode::OK, axum::Json(TripPlanView::from(plan))).into_response())
}

pub(crate) async fn booking_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
    Path(plan_id): Path<String>,
    axum::Json(request): axum::Json<BookingRequest>,
) -> Result<Response, AppError>
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let confirmation = service.book(&PlanId(plan_id), request.package)?;
    Ok((StatusCode::CREATED, axum::Json(confirmation)).into_response())
}

pub(crate) async fn compliance_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
    axum::Json(payload): axum::Json<TripRequestPayload>,
) -> Response
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let result = service.check_compliance(payload);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn preferences_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
) -> Response
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let context = service.context();
    let traveler = context.profile();
    let payload = json!({
        "traveler": traveler.personal_info.full_name,
        "preferences": context.preferences(),
        "loyalty_programs": traveler.travel_preferences.loyalty_programs,
        "summary_markdown": context.preference_summary(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn policy_search_handler<R, L>(
    State(service): State<Arc<TripPlanningService<R, L>>>,
    Query(params): Query<PolicySearchParams>,
) -> Response
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let excerpts = service.search_policy(&params.q, limit);
    let payload = json!({
        "query": params.q,
        "results": excerpts,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
