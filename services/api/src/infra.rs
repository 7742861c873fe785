use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use travel_desk::config::DataConfig;
use travel_desk::workflows::planning::{
    JsonLinesBookingLedger, MockInventory, PlanId, PlanRepository, PolicyConfig, RepositoryError,
    TravelerContext, TripPlan, TripPlanningService,
};

pub(crate) type PlanningService = TripPlanningService<InMemoryPlanRepository, JsonLinesBookingLedger>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Plans live for the lifetime of the process.
#[derive(Default)]
pub(crate) struct InMemoryPlanRepository {
    plans: Mutex<HashMap<PlanId, TripPlan>>,
}

impl PlanRepository for InMemoryPlanRepository {
    fn insert(&self, plan: TripPlan) -> Result<TripPlan, RepositoryError> {
        let mut guard = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.contains_key(&plan.plan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(plan.plan_id.clone(), plan.clone());
        Ok(plan)
    }

    fn fetch(&self, id: &PlanId) -> Result<Option<TripPlan>, RepositoryError> {
        let guard = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(id).cloned())
    }
}

/// Wire the planning service from the configured data sources.
pub(crate) fn build_planning_service(data: &DataConfig) -> PlanningService {
    TripPlanningService::new(
        Arc::new(TravelerContext::load(data)),
        Arc::new(MockInventory::from_seed(data.inventory_seed)),
        PolicyConfig::corporate(),
        Arc::new(InMemoryPlanRepository::default()),
        Arc::new(JsonLinesBookingLedger::new(&data.booking_log_path)),
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
