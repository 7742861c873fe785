use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use travel_desk::workflows::planning::{
    planning_router, BookingLedger, PlanRepository, TripPlanningService,
};

pub(crate) fn with_planning_routes<R, L>(service: Arc<TripPlanningService<R, L>>) -> axum::Router
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    planning_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_planning_service;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use travel_desk::config::DataConfig;

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }

    fn data_config(booking_log: PathBuf) -> DataConfig {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        DataConfig {
            history_path: root.join("sample_travel_history.csv"),
            profile_path: root.join("travel_profile.json"),
            policy_path: root.join("company_policy.md"),
            booking_log_path: booking_log,
            inventory_seed: Some(11),
        }
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = readiness_endpoint(Extension(app_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = metrics_endpoint(Extension(app_state(true)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn combined_router_serves_health_and_planning_routes() {
        let log = std::env::temp_dir().join("travel-desk-api-routes-test.jsonl");
        let service = build_planning_service(&data_config(log));
        let app = with_planning_routes(Arc::new(service)).layer(Extension(app_state(true)));

        let health = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("health route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let plan = app
            .clone()
            .oneshot(
                Request::post("/api/v1/trips/plans")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "origin": "Chicago",
                            "destination": "Austin",
                            "depart_date": "2025-12-01",
                            "return_date": "2025-12-03",
                            "purpose": "Quarterly business review",
                            "budget": 1500
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("plan route executes");
        assert_eq!(plan.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(plan.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let created: serde_json::Value = serde_json::from_slice(&bytes).expect("plan json");
        let plan_id = created["plan_id"].as_str().expect("plan id present");

        let stored = app
            .oneshot(
                Request::get(format!("/api/v1/trips/plans/{plan_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("status route executes");
        assert_eq!(stored.status(), StatusCode::OK);
    }
}
