use super::config::PolicyConfig;
use super::{NoteKind, PolicyNote};
use crate::workflows::planning::domain::{whole_dollars, TripRequest};

/// Accumulates the outcome of each rule in evaluation order.
#[derive(Default)]
pub(crate) struct RuleLedger {
    pub violations: Vec<String>,
    pub notes: Vec<PolicyNote>,
}

impl RuleLedger {
    fn violation(&mut self, message: String) {
        self.violations.push(message);
    }

    fn note(&mut self, kind: NoteKind, message: String) {
        self.notes.push(PolicyNote { kind, message });
    }
}

pub(crate) fn business_purpose(request: &TripRequest, ledger: &mut RuleLedger) {
    match request.business_purpose() {
        Some(purpose) => ledger.note(NoteKind::Confirmed, format!("Business purpose: {purpose}")),
        None => ledger.violation("Trip must have a business justification".to_string()),
    }
}

pub(crate) fn budget(request: &TripRequest, config: &PolicyConfig, ledger: &mut RuleLedger) {
    let Some(amount) = request.budget.checked_amount() else {
        ledger.note(NoteKind::Caution, "Could not verify budget amount".to_string());
        return;
    };

    if amount > config.budget_ceiling {
        ledger.violation(format!(
            "Total budget {} exceeds {} limit - Manager approval required",
            whole_dollars(amount),
            whole_dollars(config.budget_ceiling)
        ));
    } else if amount > config.approval_threshold {
        ledger.note(
            NoteKind::Caution,
            format!(
                "Budget {} exceeds {} - Manager approval required",
                whole_dollars(amount),
                whole_dollars(config.approval_threshold)
            ),
        );
    } else {
        ledger.note(
            NoteKind::Confirmed,
            format!("Budget {} is within policy", whole_dollars(amount)),
        );
    }
}

// The flight, hotel, and car rules below only restate the policy; they are not
// checked against the generated offers.

pub(crate) fn flight_class(config: &PolicyConfig, ledger: &mut RuleLedger) {
    let cap = whole_dollars(f64::from(config.flight_round_trip_cap));
    ledger.note(
        NoteKind::Confirmed,
        format!("Flight policy: Coach/Economy class only (max {cap} round trip)"),
    );
    ledger.note(
        NoteKind::Detail,
        format!("Mock flights are all in economy class and under {cap}"),
    );
}

pub(crate) fn hotel_rate(request: &TripRequest, config: &PolicyConfig, ledger: &mut RuleLedger) {
    let cap = whole_dollars(f64::from(config.hotel_nightly_cap(&request.destination)));
    let tier = if config.is_premium_city(&request.destination) {
        "expensive city exception"
    } else {
        "standard cities"
    };
    ledger.note(
        NoteKind::Confirmed,
        format!("Hotel policy: Max {cap}/night ({tier})"),
    );
    ledger.note(
        NoteKind::Detail,
        "Our recommendations include corporate discount rates under limit".to_string(),
    );
}

pub(crate) fn car_rental(config: &PolicyConfig, ledger: &mut RuleLedger) {
    let cap = whole_dollars(f64::from(config.car_daily_cap));
    ledger.note(NoteKind::Confirmed, format!("Car rental policy: Max {cap}/day"));
    ledger.note(
        NoteKind::Detail,
        format!("All rental options comply with {cap}/day limit"),
    );
}

pub(crate) fn preferred_vendors(config: &PolicyConfig, ledger: &mut RuleLedger) {
    ledger.note(
        NoteKind::Confirmed,
        format!("Preferred airlines: {}", config.preferred_airlines.join(", ")),
    );
    ledger.note(
        NoteKind::Confirmed,
        format!("Preferred hotels: {}", config.preferred_hotels.join(", ")),
    );
    ledger.note(
        NoteKind::Confirmed,
        format!(
            "Preferred car rentals: {}",
            config.preferred_car_rentals.join(", ")
        ),
    );
}
