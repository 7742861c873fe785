use serde::{Deserialize, Serialize};

/// Corporate travel policy thresholds. Built once at start-up and shared
/// read-only with the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Budgets above this require manager approval and are violations.
    pub budget_ceiling: f64,
    /// Budgets above this (up to the ceiling) need approval but pass.
    pub approval_threshold: f64,
    pub flight_round_trip_cap: u32,
    pub standard_hotel_nightly_cap: u32,
    pub premium_city_hotel_nightly_cap: u32,
    /// Matched as lower-case substrings of the destination.
    pub premium_cities: Vec<String>,
    pub car_daily_cap: u32,
    pub preferred_airlines: Vec<String>,
    pub preferred_hotels: Vec<String>,
    pub preferred_car_rentals: Vec<String>,
}

impl PolicyConfig {
    pub fn corporate() -> Self {
        Self {
            budget_ceiling: 2000.0,
            approval_threshold: 1500.0,
            flight_round_trip_cap: 600,
            standard_hotel_nightly_cap: 200,
            premium_city_hotel_nightly_cap: 250,
            premium_cities: to_strings(&[
                "new york",
                "nyc",
                "san francisco",
                "sfo",
                "los angeles",
                "la",
                "boston",
                "washington",
                "dc",
                "seattle",
                "chicago",
            ]),
            car_daily_cap: 75,
            preferred_airlines: to_strings(&["Delta", "United", "American"]),
            preferred_hotels: to_strings(&["Marriott", "Hilton", "Hyatt"]),
            preferred_car_rentals: to_strings(&["Enterprise", "Hertz", "National"]),
        }
    }

    /// Substring match, so short codes such as `la` also hit `Dallas`.
    pub fn is_premium_city(&self, destination: &str) -> bool {
        let destination = destination.to_lowercase();
        self.premium_cities
            .iter()
            .any(|city| destination.contains(city.as_str()))
    }

    pub fn hotel_nightly_cap(&self, destination: &str) -> u32 {
        if self.is_premium_city(destination) {
            self.premium_city_hotel_nightly_cap
        } else {
            self.standard_hotel_nightly_cap
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::corporate()
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
