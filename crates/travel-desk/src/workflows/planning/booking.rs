use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::dollars_and_cents;
use super::packages::Package;
use super::report::PlanId;
use crate::workflows::history::TravelerProfile;

/// Reservation codes derived from the booking instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCodes {
    pub confirmation: String,
    pub flight_pnr: String,
    pub hotel_reservation: String,
    pub car_reservation: String,
}

impl ReservationCodes {
    pub fn issued_at(at: DateTime<Utc>) -> Self {
        let clock = at.format("%H%M%S");
        Self {
            confirmation: format!("CONF{}", at.format("%Y%m%d%H%M%S")),
            flight_pnr: format!("PNR{clock}"),
            hotel_reservation: format!("RES{clock}"),
            car_reservation: format!("CAR{clock}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub plan_id: PlanId,
    pub package: usize,
    pub booked_at: DateTime<Utc>,
    pub codes: ReservationCodes,
    pub traveler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub airline: String,
    pub flight_number: String,
    pub depart_time: String,
    pub arrive_time: String,
    pub hotel: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: u32,
    pub rental_company: String,
    pub vehicle: String,
    pub flight_cost: u32,
    pub hotel_cost: u32,
    pub car_cost: u32,
    pub total_cost: u32,
    pub payment_method: String,
    /// Whether the confirmation reached the booking log.
    pub recorded: bool,
}

impl BookingConfirmation {
    pub fn new(
        plan_id: PlanId,
        package: &Package,
        check_in: &str,
        check_out: &str,
        traveler: &TravelerProfile,
        booked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            plan_id,
            package: package.rank,
            booked_at,
            codes: ReservationCodes::issued_at(booked_at),
            traveler: traveler.personal_info.full_name.clone(),
            email: traveler.personal_info.email.clone(),
            airline: package.flight.airline.clone(),
            flight_number: package.flight.flight_number.clone(),
            depart_time: package.flight.depart_time.clone(),
            arrive_time: package.flight.arrive_time.clone(),
            hotel: package.hotel.name.clone(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            nights: package.hotel.nights,
            rental_company: package.car.company.clone(),
            vehicle: format!("{}: {}", package.car.vehicle_class, package.car.model),
            flight_cost: package.flight.price,
            hotel_cost: package.hotel.total_price,
            car_cost: package.car.total_cost,
            total_cost: package.total_cost,
            payment_method: traveler.payment_info.masked_label(),
            recorded: false,
        }
    }

    /// Plain-text confirmation suitable for a terminal or e-mail body.
    pub fn to_text(&self) -> String {
        let rule = "-".repeat(58);
        let mut lines = vec![
            "BOOKING CONFIRMATION".to_string(),
            format!("Confirmation Code: {}", self.codes.confirmation),
            format!("Booking Date: {}", self.booked_at.format("%Y-%m-%d %H:%M")),
            format!("Plan: {} (package {})", self.plan_id, self.package),
            rule.clone(),
            "FLIGHT RESERVATION".to_string(),
            format!("Airline: {}", self.airline),
            format!("Flight: {}", self.flight_number),
            format!("Departure: {}", self.depart_time),
            format!("Arrival: {}", self.arrive_time),
            format!("Passenger: {}", self.traveler),
            format!("PNR: {}", self.codes.flight_pnr),
            rule.clone(),
            "HOTEL RESERVATION".to_string(),
            format!("Hotel: {}", self.hotel),
            format!("Check-in: {}", self.check_in),
            format!("Check-out: {}", self.check_out),
            format!("Nights: {}", self.nights),
            format!("Confirmation: {}", self.codes.hotel_reservation),
            rule.clone(),
            "CAR RESERVATION".to_string(),
            format!("Company: {}", self.rental_company),
            format!("Vehicle: {}", self.vehicle),
            format!("Confirmation: {}", self.codes.car_reservation),
            rule.clone(),
            "PAYMENT SUMMARY".to_string(),
            format!("Flight: {:>14}", dollars_and_cents(f64::from(self.flight_cost))),
            format!("Hotel: {:>15}", dollars_and_cents(f64::from(self.hotel_cost))),
            format!("Car: {:>17}", dollars_and_cents(f64::from(self.car_cost))),
            format!("Total: {:>15}", dollars_and_cents(f64::from(self.total_cost))),
            format!("Charged to: {}", self.payment_method),
        ];
        if let Some(email) = &self.email {
            lines.push(format!("Confirmation sent to: {email}"));
        }
        if !self.recorded {
            lines.push(rule);
            lines.push("Note: this booking could not be saved to the booking log.".to_string());
        }
        lines.join("\n")
    }
}

/// Durable record of confirmed bookings.
pub trait BookingLedger: Send + Sync {
    fn record(&self, confirmation: &BookingConfirmation) -> Result<(), LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("failed to write booking log: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode booking record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Appends one JSON document per line; existing lines are never rewritten.
#[derive(Debug)]
pub struct JsonLinesBookingLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesBookingLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

impl BookingLedger for JsonLinesBookingLedger {
    fn record(&self, confirmation: &BookingConfirmation) -> Result<(), LedgerError> {
        let mut line = serde_json::to_string(confirmation)?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
