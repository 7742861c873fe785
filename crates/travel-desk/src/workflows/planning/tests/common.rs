use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::history::{fallback_record, PaymentInfo, PersonalInfo, TravelRecord, TravelerProfile};
use crate::workflows::planning::booking::{BookingConfirmation, BookingLedger, LedgerError};
use crate::workflows::planning::domain::{Budget, CarOption, FlightOption, HotelOption, TripRequest};
use crate::workflows::planning::inventory::MockInventory;
use crate::workflows::planning::preferences::{PreferenceProfile, ProviderCount};
use crate::workflows::planning::report::{PlanId, TripPlan};
use crate::workflows::planning::repository::{PlanRepository, RepositoryError};
use crate::workflows::planning::{
    planning_router, PolicyConfig, PolicyDocument, TravelerContext, TripPlanningService,
    TripRequestPayload,
};

pub(super) fn trip(destination: &str, purpose: Option<&str>, budget: Budget) -> TripRequest {
    TripRequest {
        origin: "Dallas".to_string(),
        destination: destination.to_string(),
        depart_date: "2025-11-05".to_string(),
        return_date: "2025-11-08".to_string(),
        purpose: purpose.map(str::to_string),
        budget,
    }
}

pub(super) fn payload(destination: &str) -> TripRequestPayload {
    TripRequestPayload {
        origin: Some("Chicago".to_string()),
        destination: Some(destination.to_string()),
        depart_date: Some("2025-11-05".to_string()),
        return_date: Some("2025-11-08".to_string()),
        purpose: Some("Quarterly client review".to_string()),
        budget: Some(serde_json::json!(1800)),
        ..TripRequestPayload::default()
    }
}

pub(super) fn providers(names: &[&str]) -> Vec<ProviderCount> {
    names
        .iter()
        .map(|name| ProviderCount {
            name: name.to_string(),
            count: 1,
        })
        .collect()
}

pub(super) fn profile(airlines: &[&str], hotels: &[&str], cars: &[&str]) -> PreferenceProfile {
    PreferenceProfile {
        preferred_airlines: providers(airlines),
        preferred_hotels: providers(hotels),
        preferred_rental_cars: providers(cars),
        ..PreferenceProfile::default()
    }
}

pub(super) fn flight(airline: &str, stops: u8, duration: &str, price: u32) -> FlightOption {
    FlightOption {
        airline: airline.to_string(),
        flight_number: format!("{}{}", &airline[..2].to_uppercase(), price),
        depart_time: "2025-11-05 08:00".to_string(),
        arrive_time: "2025-11-05 11:10".to_string(),
        price,
        cabin_class: "Economy".to_string(),
        stops,
        duration: duration.to_string(),
    }
}

pub(super) fn hotel(brand: &str, name: &str, total_price: u32) -> HotelOption {
    HotelOption {
        name: name.to_string(),
        brand: brand.to_string(),
        stars: 3,
        nightly_rate: total_price / 3,
        nights: 3,
        total_price,
        location: "Raleigh Downtown".to_string(),
        amenities: vec!["WiFi".to_string()],
        corporate_rate: false,
        rate_type: "Standard Rate".to_string(),
        distance_to_center: "0.8 mi".to_string(),
    }
}

pub(super) fn car(company: &str, total_cost: u32) -> CarOption {
    CarOption {
        company: company.to_string(),
        vehicle_class: "Compact".to_string(),
        model: "Toyota Corolla or similar".to_string(),
        daily_rate: total_cost / 3,
        days: 3,
        total_cost,
        location: "Raleigh Airport".to_string(),
        unlimited_miles: true,
        preferred: true,
        policy_compliant: true,
    }
}

pub(super) fn traveler() -> TravelerProfile {
    let mut traveler = TravelerProfile {
        personal_info: PersonalInfo {
            full_name: "Jordan Avery".to_string(),
            email: Some("jordan.avery@example.com".to_string()),
        },
        payment_info: PaymentInfo {
            card_type: Some("Corporate Amex".to_string()),
            last_four: Some("0005".to_string()),
        },
        ..TravelerProfile::default()
    };
    traveler
        .travel_preferences
        .loyalty_programs
        .insert("airline".to_string(), vec!["Delta SkyMiles".to_string()]);
    traveler
}

pub(super) fn history() -> Vec<TravelRecord> {
    let mut united = fallback_record();
    united.trip_code = Some("TRP002".to_string());
    united.airline = Some("United".to_string());
    united.hotel = Some("Hilton Garden Inn".to_string());
    united.rental_car = Some("Hertz".to_string());
    united.total_cost = Some("1450".to_string());
    vec![fallback_record(), united, fallback_record()]
}

pub(super) fn context() -> Arc<TravelerContext> {
    let policy = PolicyDocument::from_text(
        "Hotel stays must stay under the nightly cap. Flights are economy only. \
         Car rental requires a preferred vendor and budget approval above the threshold.",
    );
    Arc::new(TravelerContext::new(&history(), traveler(), policy))
}

pub(super) fn build_service<L: BookingLedger + 'static>(
    ledger: Arc<L>,
) -> (TripPlanningService<MemoryRepository, L>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = TripPlanningService::new(
        context(),
        Arc::new(MockInventory::seeded(2025)),
        PolicyConfig::corporate(),
        repository.clone(),
        ledger,
    );
    (service, repository)
}

pub(super) fn router_with_service(
    service: TripPlanningService<MemoryRepository, MemoryLedger>,
) -> axum::Router {
    planning_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) plans: Arc<Mutex<HashMap<PlanId, TripPlan>>>,
}

impl PlanRepository for MemoryRepository {
    fn insert(&self, plan: TripPlan) -> Result<TripPlan, RepositoryError> {
        let mut guard = self.plans.lock().expect("repository mutex poisoned");
        if guard.contains_key(&plan.plan_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(plan.plan_id.clone(), plan.clone());
        Ok(plan)
    }

    fn fetch(&self, id: &PlanId) -> Result<Option<TripPlan>, RepositoryError> {
        let guard = self.plans.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl PlanRepository for UnavailableRepository {
    fn insert(&self, _plan: TripPlan) -> Result<TripPlan, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PlanId) -> Result<Option<TripPlan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    entries: Arc<Mutex<Vec<BookingConfirmation>>>,
}

impl MemoryLedger {
    pub(super) fn entries(&self) -> Vec<BookingConfirmation> {
        self.entries.lock().expect("ledger mutex poisoned").clone()
    }
}

impl BookingLedger for MemoryLedger {
    fn record(&self, confirmation: &BookingConfirmation) -> Result<(), LedgerError> {
        self.entries
            .lock()
            .expect("ledger mutex poisoned")
            .push(confirmation.clone());
        Ok(())
    }
}

pub(super) struct BrokenLedger;

impl BookingLedger for BrokenLedger {
    fn record(&self, _confirmation: &BookingConfirmation) -> Result<(), LedgerError> {
        Err(LedgerError::Io(std::io::Error::other("disk full")))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
