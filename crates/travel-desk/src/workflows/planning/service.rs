use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::booking::{BookingConfirmation, BookingLedger};
use super::compliance::{ComplianceEvaluator, ComplianceResult, PolicyConfig};
use super::domain::{TripRequest, TripRequestPayload};
use super::inventory::InventorySource;
use super::packages::assemble_packages;
use super::policy_document::{PolicyDocument, PolicyExcerpt};
use super::preferences::{extract_preferences, PreferenceProfile};
use super::ranking::rank_options;
use super::report::{PlanId, TripPlan};
use super::repository::{PlanRepository, RepositoryError};
use super::research::DestinationBrief;
use crate::config::DataConfig;
use crate::workflows::history::{TravelHistoryImporter, TravelRecord, TravelerProfile};

const PLAN_POLICY_EXCERPTS: usize = 2;

/// Traveler data loaded once at start-up and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TravelerContext {
    profile: TravelerProfile,
    preferences: PreferenceProfile,
    policy: PolicyDocument,
}

impl TravelerContext {
    pub fn new(history: &[TravelRecord], profile: TravelerProfile, policy: PolicyDocument) -> Self {
        let preferences = extract_preferences(history);
        Self {
            profile,
            preferences,
            policy,
        }
    }

    /// Load every source, falling back to built-in data where one is missing.
    pub fn load(data: &DataConfig) -> Self {
        let context = Self::new(
            &TravelHistoryImporter::load_or_fallback(&data.history_path),
            TravelerProfile::load_or_default(&data.profile_path),
            PolicyDocument::load_or_default(&data.policy_path),
        );
        info!(
            trips = context.preferences.total_trips,
            policy_chunks = context.policy.len(),
            "traveler context ready"
        );
        context
    }

    pub fn profile(&self) -> &TravelerProfile {
        &self.profile
    }

    pub fn preferences(&self) -> &PreferenceProfile {
        &self.preferences
    }

    pub fn policy(&self) -> &PolicyDocument {
        &self.policy
    }

    pub fn preference_summary(&self) -> String {
        self.preferences.summary(&self.profile)
    }
}

/// Service composing traveler context, inventory, policy evaluation, plan
/// storage, and the booking ledger.
pub struct TripPlanningService<R, L> {
    context: Arc<TravelerContext>,
    inventory: Arc<dyn InventorySource>,
    evaluator: Arc<ComplianceEvaluator>,
    repository: Arc<R>,
    ledger: Arc<L>,
}

static PLAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_plan_id() -> PlanId {
    let id = PLAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PlanId(format!("plan-{id:06}"))
}

impl<R, L> TripPlanningService<R, L>
where
    R: PlanRepository + 'static,
    L: BookingLedger + 'static,
{
    pub fn new(
        context: Arc<TravelerContext>,
        inventory: Arc<dyn InventorySource>,
        policy: PolicyConfig,
        repository: Arc<R>,
        ledger: Arc<L>,
    ) -> Self {
        Self {
            context,
            inventory,
            evaluator: Arc::new(ComplianceEvaluator::new(policy)),
            repository,
            ledger,
        }
    }

    pub fn context(&self) -> &TravelerContext {
        &self.context
    }

    /// Policy verdict for a request without generating any offers.
    pub fn check_compliance(&self, payload: TripRequestPayload) -> ComplianceResult {
        self.evaluator.evaluate(&TripRequest::from(payload))
    }

    pub fn search_policy(&self, query: &str, limit: usize) -> Vec<PolicyExcerpt> {
        self.context.policy().search(query, limit)
    }

    /// Generate, rank, and store a complete plan for the request.
    pub fn plan(&self, payload: TripRequestPayload) -> Result<TripPlan, PlanningError> {
        let request = TripRequest::from(payload);
        if request.origin.is_empty() || request.destination.is_empty() {
            return Err(PlanningError::InvalidRequest(
                "origin and destination are required".to_string(),
            ));
        }

        let preferences = self.context.preferences();
        let flights = rank_options(&self.inventory.search_flights(&request), preferences);
        let hotels = rank_options(&self.inventory.search_hotels(&request), preferences);
        let cars = rank_options(&self.inventory.search_cars(&request), preferences);
        let packages = assemble_packages(&flights, &hotels, &cars, preferences);

        let compliance = self.evaluator.evaluate(&request);
        let policy_query = format!(
            "flight hotel car rental budget approval {}",
            request.destination
        );
        let policy_excerpts = self.search_policy(&policy_query, PLAN_POLICY_EXCERPTS);
        let research = DestinationBrief::research(&request.destination, &request.depart_date);

        let plan = TripPlan {
            plan_id: next_plan_id(),
            created_at: Utc::now(),
            preferences: preferences.clone(),
            preference_summary: self.context.preference_summary(),
            flights,
            hotels,
            cars,
            compliance,
            research,
            policy_excerpts,
            packages,
            request,
        };

        let stored = self.repository.insert(plan)?;
        info!(
            plan_id = %stored.plan_id,
            destination = %stored.request.destination,
            status = stored.compliance.status.label(),
            packages = stored.packages.len(),
            "trip plan created"
        );
        Ok(stored)
    }

    pub fn get(&self, plan_id: &PlanId) -> Result<TripPlan, PlanningError> {
        let plan = self
            .repository
            .fetch(plan_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(plan)
    }

    /// Book package `number` (1-based) of a stored plan. A ledger failure is
    /// logged and reported through `recorded`, never as an error.
    pub fn book(&self, plan_id: &PlanId, number: usize) -> Result<BookingConfirmation, PlanningError> {
        let plan = self.get(plan_id)?;
        let package = plan
            .package(number)
            .ok_or(PlanningError::UnknownPackage {
                requested: number,
                available: plan.packages.len(),
            })?;

        let mut confirmation = BookingConfirmation::new(
            plan.plan_id.clone(),
            package,
            &plan.request.depart_date,
            &plan.request.return_date,
            self.context.profile(),
            Utc::now(),
        );

        match self.ledger.record(&confirmation) {
            Ok(()) => confirmation.recorded = true,
            Err(err) => {
                warn!(plan_id = %plan_id, error = %err, "booking could not be saved to the ledger");
            }
        }

        info!(
            plan_id = %plan_id,
            package = number,
            confirmation = %confirmation.codes.confirmation,
            total = confirmation.total_cost,
            "package booked"
        );
        Ok(confirmation)
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),
    #[error("package {requested} does not exist; the plan has {available} package(s)")]
    UnknownPackage { requested: usize, available: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
