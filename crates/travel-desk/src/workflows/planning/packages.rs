use serde::{Deserialize, Serialize};

use super::domain::{CarOption, Candidate, FlightOption, HotelOption};
use super::preferences::PreferenceProfile;

const MAX_PACKAGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceMatch {
    PreferredAirline,
    PreferredHotel,
    PreferredCarRental,
}

impl PreferenceMatch {
    pub fn label(self) -> &'static str {
        match self {
            PreferenceMatch::PreferredAirline => "preferred airline",
            PreferenceMatch::PreferredHotel => "preferred hotel",
            PreferenceMatch::PreferredCarRental => "preferred car rental",
        }
    }
}

/// Flight, hotel, and car taken from the same rank of their lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// 1-based position, as shown to the traveler.
    pub rank: usize,
    pub flight: FlightOption,
    pub hotel: HotelOption,
    pub car: CarOption,
    pub total_cost: u32,
    pub matches: Vec<PreferenceMatch>,
}

/// Pair the ranked lists positionally. Yields at most three packages and none
/// when any list is empty.
pub fn assemble_packages(
    flights: &[FlightOption],
    hotels: &[HotelOption],
    cars: &[CarOption],
    profile: &PreferenceProfile,
) -> Vec<Package> {
    flights
        .iter()
        .zip(hotels)
        .zip(cars)
        .take(MAX_PACKAGES)
        .enumerate()
        .map(|(index, ((flight, hotel), car))| {
            let mut matches = Vec::new();
            if profile.prefers_airline(flight.provider()) {
                matches.push(PreferenceMatch::PreferredAirline);
            }
            if profile.prefers_hotel_brand(hotel.provider()) {
                matches.push(PreferenceMatch::PreferredHotel);
            }
            if profile.prefers_car_company(car.provider()) {
                matches.push(PreferenceMatch::PreferredCarRental);
            }

            Package {
                rank: index + 1,
                flight: flight.clone(),
                hotel: hotel.clone(),
                car: car.clone(),
                total_cost: flight
                    .cost()
                    .saturating_add(hotel.cost())
                    .saturating_add(car.cost()),
                matches,
            }
        })
        .collect()
}
