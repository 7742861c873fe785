//! Trip evaluation and ranking.
//!
//! The core (`preferences`, `compliance`, `ranking`, `packages`) is pure and
//! never fails. The service layer around it adds offer generation, research,
//! policy retrieval, plan storage, and booking.

pub mod booking;
pub mod compliance;
pub mod domain;
pub mod inventory;
pub mod packages;
pub mod policy_document;
pub mod preferences;
pub mod ranking;
pub mod report;
pub mod repository;
pub mod research;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use booking::{
    BookingConfirmation, BookingLedger, JsonLinesBookingLedger, LedgerError, ReservationCodes,
};
pub use compliance::{
    ComplianceEvaluator, ComplianceResult, ComplianceStatus, NoteKind, PolicyConfig, PolicyNote,
};
pub use domain::{
    Budget, Candidate, CarOption, FlightOption, HotelOption, TripRequest, TripRequestPayload,
};
pub use inventory::{InventorySource, MockInventory};
pub use packages::{assemble_packages, Package, PreferenceMatch};
pub use policy_document::{PolicyDocument, PolicyExcerpt};
pub use preferences::{extract_preferences, PreferenceProfile, ProviderCount};
pub use ranking::{rank_options, Rankable};
pub use report::{PlanId, TripPlan};
pub use repository::{PlanRepository, RepositoryError};
pub use research::DestinationBrief;
pub use router::{planning_router, BookingRequest, TripPlanView};
pub use service::{PlanningError, TravelerContext, TripPlanningService};
