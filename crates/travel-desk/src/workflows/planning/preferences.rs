use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::domain::dollars_and_cents;
use crate::workflows::history::{TravelRecord, TravelerProfile};

const TOP_PROVIDERS: usize = 3;
const DEFAULT_CABIN_CLASS: &str = "Economy";

/// How often a provider shows up in the traveler's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCount {
    pub name: String,
    pub count: usize,
}

/// Preferences inferred from the full trip history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub preferred_airlines: Vec<ProviderCount>,
    pub preferred_hotels: Vec<ProviderCount>,
    pub preferred_rental_cars: Vec<ProviderCount>,
    pub typical_flight_class: String,
    pub average_trip_cost: f64,
    pub total_trips: usize,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            preferred_airlines: Vec::new(),
            preferred_hotels: Vec::new(),
            preferred_rental_cars: Vec::new(),
            typical_flight_class: DEFAULT_CABIN_CLASS.to_string(),
            average_trip_cost: 0.0,
            total_trips: 0,
        }
    }
}

impl PreferenceProfile {
    pub fn prefers_airline(&self, airline: &str) -> bool {
        contains(&self.preferred_airlines, airline)
    }

    pub fn prefers_hotel_brand(&self, brand: &str) -> bool {
        contains(&self.preferred_hotels, brand)
    }

    pub fn prefers_car_company(&self, company: &str) -> bool {
        contains(&self.preferred_rental_cars, company)
    }

    /// Human-readable analysis, including the traveler's loyalty programs.
    pub fn summary(&self, traveler: &TravelerProfile) -> String {
        let mut lines = vec!["**Travel History Analysis:**\n".to_string()];

        lines.push(format!("Total trips analyzed: {}", self.total_trips));
        lines.push(format!(
            "Average trip cost: {}",
            dollars_and_cents(self.average_trip_cost)
        ));
        lines.push(format!(
            "Typical flight class: {}\n",
            self.typical_flight_class
        ));

        push_section(&mut lines, "**Preferred Airlines:**", &self.preferred_airlines, "trips");
        push_section(&mut lines, "\n**Preferred Hotels:**", &self.preferred_hotels, "stays");
        push_section(
            &mut lines,
            "\n**Preferred Rental Cars:**",
            &self.preferred_rental_cars,
            "rentals",
        );

        let programs: Vec<&str> = traveler.loyalty_programs().collect();
        if !programs.is_empty() {
            lines.push("\n**Loyalty Programs:**".to_string());
            lines.extend(programs.into_iter().map(|program| format!("  - {program}")));
        }

        lines.join("\n")
    }
}

fn contains(providers: &[ProviderCount], name: &str) -> bool {
    providers.iter().any(|provider| provider.name == name)
}

fn push_section(lines: &mut Vec<String>, title: &str, providers: &[ProviderCount], unit: &str) {
    if providers.is_empty() {
        return;
    }
    lines.push(title.to_string());
    for provider in providers {
        lines.push(format!("  - {} ({} {unit})", provider.name, provider.count));
    }
}

/// Counts values while remembering the order each was first seen.
#[derive(Default)]
struct Tally<'a> {
    index: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, usize)>,
}

impl<'a> Tally<'a> {
    fn record(&mut self, value: &'a str) {
        match self.index.get(value).copied() {
            Some(slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(value, self.counts.len());
                self.counts.push((value, 1));
            }
        }
    }

    /// Most frequent first; the stable sort keeps encounter order on ties.
    fn most_common(mut self, limit: usize) -> Vec<ProviderCount> {
        self.counts.sort_by(|left, right| right.1.cmp(&left.1));
        self.counts
            .into_iter()
            .take(limit)
            .map(|(name, count)| ProviderCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }
}

pub fn extract_preferences(history: &[TravelRecord]) -> PreferenceProfile {
    if history.is_empty() {
        return PreferenceProfile::default();
    }

    let mut airlines = Tally::default();
    let mut hotels = Tally::default();
    let mut rental_cars = Tally::default();
    let mut flight_classes = Tally::default();
    let mut costs = Vec::new();

    for trip in history {
        if let Some(airline) = trip.airline.as_deref() {
            airlines.record(airline);
        }
        if let Some(brand) = trip.hotel_brand() {
            hotels.record(brand);
        }
        if let Some(company) = trip.rental_company() {
            rental_cars.record(company);
        }
        if let Some(class) = trip.flight_class.as_deref() {
            flight_classes.record(class);
        }
        if let Some(cost) = trip
            .total_cost
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|cost| cost.is_finite())
        {
            costs.push(cost);
        }
    }

    let typical_flight_class = flight_classes
        .most_common(1)
        .into_iter()
        .next()
        .map(|class| class.name)
        .unwrap_or_else(|| DEFAULT_CABIN_CLASS.to_string());

    let average_trip_cost = if costs.is_empty() {
        0.0
    } else {
        costs.iter().sum::<f64>() / costs.len() as f64
    };

    PreferenceProfile {
        preferred_airlines: airlines.most_common(TOP_PROVIDERS),
        preferred_hotels: hotels.most_common(TOP_PROVIDERS),
        preferred_rental_cars: rental_cars.most_common(TOP_PROVIDERS),
        typical_flight_class,
        average_trip_cost,
        total_trips: history.len(),
    }
}
