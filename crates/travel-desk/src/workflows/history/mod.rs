//! Traveler history and profile sources.
//!
//! Both loaders have a strict `from_*` form that reports failures and a
//! `load_or_fallback` form used at start-up that always yields usable data.

mod parser;
mod profile;

pub use profile::{
    LoyaltyPrograms, PaymentInfo, PersonalInfo, TravelPreferences, TravelerProfile,
};

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One historical trip as exported from the expense system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub trip_code: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub airline: Option<String>,
    pub hotel: Option<String>,
    pub flight_class: Option<String>,
    pub rental_car: Option<String>,
    pub trip_date: Option<String>,
    /// Kept as text; unparsable amounts are skipped by the analysis.
    pub total_cost: Option<String>,
}

impl TravelRecord {
    /// Brand of the hotel stay: the first word of the hotel name.
    pub fn hotel_brand(&self) -> Option<&str> {
        self.hotel
            .as_deref()
            .and_then(|hotel| hotel.split_whitespace().next())
    }

    /// Rental company, ignoring trips explicitly marked as `None`.
    pub fn rental_company(&self) -> Option<&str> {
        self.rental_car
            .as_deref()
            .filter(|company| !company.eq_ignore_ascii_case("none"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TravelDataError {
    #[error("failed to read traveler data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid travel history CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid travel profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct TravelHistoryImporter;

impl TravelHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TravelRecord>, TravelDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TravelRecord>, TravelDataError> {
        Ok(parser::parse_records(reader)?)
    }

    /// Load the history, substituting the built-in sample trip on any failure.
    pub fn load_or_fallback<P: AsRef<Path>>(path: P) -> Vec<TravelRecord> {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(records) => {
                info!(trips = records.len(), path = %path.display(), "loaded travel history");
                records
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "travel history unavailable, using sample trip");
                vec![fallback_record()]
            }
        }
    }
}

pub fn fallback_record() -> TravelRecord {
    TravelRecord {
        trip_code: Some("TRP001".to_string()),
        origin: Some("Chicago".to_string()),
        destination: Some("New York".to_string()),
        airline: Some("Delta".to_string()),
        hotel: Some("Marriott Marquis".to_string()),
        flight_class: Some("Economy".to_string()),
        rental_car: Some("Enterprise".to_string()),
        trip_date: Some("2024-03-15".to_string()),
        total_cost: Some("1250".to_string()),
    }
}
