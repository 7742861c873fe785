use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::ComplianceResult;
use super::domain::{dollars_and_cents, whole_dollars, CarOption, FlightOption, HotelOption, TripRequest};
use super::packages::Package;
use super::policy_document::PolicyExcerpt;
use super::preferences::PreferenceProfile;
use super::research::DestinationBrief;

const FLIGHTS_SHOWN: usize = 5;
const HOTELS_SHOWN: usize = 5;
const CARS_SHOWN: usize = 3;
const SHORT_HOTEL_NAME: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub String);

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything produced for one trip request. Offer lists are already ranked.
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub plan_id: PlanId,
    pub created_at: DateTime<Utc>,
    pub request: TripRequest,
    pub preferences: PreferenceProfile,
    pub preference_summary: String,
    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub cars: Vec<CarOption>,
    pub compliance: ComplianceResult,
    pub research: DestinationBrief,
    pub policy_excerpts: Vec<PolicyExcerpt>,
    pub packages: Vec<Package>,
}

impl TripPlan {
    pub fn package(&self, number: usize) -> Option<&Package> {
        self.packages.iter().find(|package| package.rank == number)
    }

    pub fn to_markdown(&self) -> String {
        let sections = [
            format!(
                "# Travel Plan {}\n\n## Your Travel Preferences\n\n{}",
                self.plan_id, self.preference_summary
            ),
            self.flights_markdown(),
            self.hotels_markdown(),
            self.cars_markdown(),
            self.compliance_markdown(),
            format!("## Weather Forecast\n\n{}", self.research.weather_markdown()),
            format!(
                "## Top 5 Recommended Restaurants\n\n{}",
                self.research.restaurants_markdown()
            ),
            format!(
                "## Additional Destination Information\n\n{}\n\n{}\n\n{}",
                self.research.advisory_markdown(),
                self.research.things_to_do_markdown(),
                self.research.ground_transport_markdown()
            ),
            self.packages_markdown(),
        ];
        sections.join("\n\n---\n\n")
    }

    fn flights_markdown(&self) -> String {
        let mut lines = vec![
            format!(
                "## Flight Options: {} to {}",
                self.request.origin, self.request.destination
            ),
            String::new(),
            format!("**Top {FLIGHTS_SHOWN} Flight Options**"),
            String::new(),
            "| # | Airline | Departure | Arrival | Duration | Stops | Price |".to_string(),
            "| --- | --- | --- | --- | --- | --- | --- |".to_string(),
        ];
        for (index, flight) in self.flights.iter().take(FLIGHTS_SHOWN).enumerate() {
            let mut tags = Vec::new();
            if self.preferences.prefers_airline(&flight.airline) {
                tags.push("preferred");
            }
            if flight.is_direct() {
                tags.push("direct");
            }
            let stops = if flight.is_direct() {
                "Direct".to_string()
            } else {
                format!("{} stop", flight.stops)
            };
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {stops} | **${}** |",
                index + 1,
                tagged(&flight.airline, &tags),
                flight.depart_time,
                flight.arrive_time,
                flight.duration,
                flight.price
            ));
        }
        lines.join("\n")
    }

    fn hotels_markdown(&self) -> String {
        let mut lines = vec![
            format!("## Hotel Options in {}", self.request.destination),
            String::new(),
            format!("**Top {HOTELS_SHOWN} Hotel Options**"),
            String::new(),
            "| # | Hotel | Stars | Nightly Rate | Nights | Total | Type |".to_string(),
            "| --- | --- | --- | --- | --- | --- | --- |".to_string(),
        ];
        for (index, hotel) in self.hotels.iter().take(HOTELS_SHOWN).enumerate() {
            let mut tags = Vec::new();
            if self.preferences.prefers_hotel_brand(&hotel.brand) {
                tags.push("preferred");
            }
            if hotel.corporate_rate {
                tags.push("corporate rate");
            }
            lines.push(format!(
                "| {} | {} | {} | ${} | {} | **${}** | {} |",
                index + 1,
                tagged(&hotel.name, &tags),
                "*".repeat(usize::from(hotel.stars)),
                hotel.nightly_rate,
                hotel.nights,
                hotel.total_price,
                hotel.rate_type
            ));
        }
        lines.join("\n")
    }

    fn cars_markdown(&self) -> String {
        let mut lines = vec![
            "## Rental Car Options".to_string(),
            String::new(),
            format!("**Top {CARS_SHOWN} Rental Car Options**"),
            String::new(),
            "| # | Company | Vehicle | Daily Rate | Days | Total | Location |".to_string(),
            "| --- | --- | --- | --- | --- | --- | --- |".to_string(),
        ];
        for (index, car) in self.cars.iter().take(CARS_SHOWN).enumerate() {
            let tags: &[&str] = if self.preferences.prefers_car_company(&car.company) {
                &["preferred"]
            } else {
                &[]
            };
            lines.push(format!(
                "| {} | {} | {}: {} | ${} | {} | **${}** | {} |",
                index + 1,
                tagged(&car.company, tags),
                car.vehicle_class,
                car.model,
                car.daily_rate,
                car.days,
                car.total_cost,
                car.location
            ));
        }
        lines.join("\n")
    }

    fn compliance_markdown(&self) -> String {
        let mut lines = vec![
            "## Policy Compliance Check".to_string(),
            String::new(),
            format!("**Status:** {}", self.compliance.status.label()),
        ];
        if !self.compliance.violations.is_empty() {
            lines.push(String::new());
            lines.push("**Violations:**".to_string());
            lines.extend(
                self.compliance
                    .violations
                    .iter()
                    .map(|violation| format!("- {violation}")),
            );
        }
        if !self.compliance.notes.is_empty() {
            lines.push(String::new());
            lines.push("**Notes:**".to_string());
            lines.extend(
                self.compliance
                    .notes
                    .iter()
                    .map(|note| format!("- {}", note.message)),
            );
        }
        if !self.policy_excerpts.is_empty() {
            lines.push(String::new());
            lines.push("**Relevant Policy Excerpts:**".to_string());
            lines.extend(
                self.policy_excerpts
                    .iter()
                    .map(|excerpt| format!("> {}", excerpt.text)),
            );
        }
        lines.join("\n")
    }

    fn packages_markdown(&self) -> String {
        let mut lines = vec!["## Recommended Travel Packages".to_string(), String::new()];
        if self.packages.is_empty() {
            lines.push("No complete packages could be assembled for this trip.".to_string());
            return lines.join("\n");
        }

        lines.push("| Package | Flight | Hotel | Car | **Total** |".to_string());
        lines.push("| --- | --- | --- | --- | --- |".to_string());
        for package in &self.packages {
            let hotel_name = if package.hotel.name.len() > SHORT_HOTEL_NAME {
                package.hotel.name.split_whitespace().next().unwrap_or_default()
            } else {
                package.hotel.name.as_str()
            };
            lines.push(format!(
                "| **Package {}:**<br>{} + {hotel_name} + {} | ${} | ${} | ${} | **{}** |",
                package.rank,
                package.flight.airline,
                package.car.company,
                package.flight.price,
                package.hotel.total_price,
                package.car.total_cost,
                whole_dollars(f64::from(package.total_cost))
            ));
        }

        lines.push(String::new());
        lines.push("### Package Details".to_string());
        for package in &self.packages {
            let flight = &package.flight;
            let hotel = &package.hotel;
            let car = &package.car;
            let stops = if flight.is_direct() {
                "Direct".to_string()
            } else {
                format!("{} stop(s)", flight.stops)
            };

            lines.extend([
                String::new(),
                format!(
                    "#### Package {}: {}",
                    package.rank,
                    dollars_and_cents(f64::from(package.total_cost))
                ),
                format!(
                    "- **Flight:** {} {} - ${}",
                    flight.airline, flight.flight_number, flight.price
                ),
                format!("  - {} to {}", flight.depart_time, flight.arrive_time),
                format!("  - Duration: {} | {stops}", flight.duration),
                format!("- **Hotel:** {} - ${} total", hotel.name, hotel.total_price),
                format!("  - ${}/night x {} nights", hotel.nightly_rate, hotel.nights),
                format!("- **Rental Car:** {} - ${} total", car.company, car.total_cost),
                format!("  - {}: {}", car.vehicle_class, car.model),
                format!("  - ${}/day x {} days", car.daily_rate, car.days),
            ]);
            if !package.matches.is_empty() {
                let labels: Vec<&str> = package.matches.iter().map(|m| m.label()).collect();
                lines.push(format!("- **Matches:** {}", labels.join(", ")));
            }
        }
        lines.join("\n")
    }
}

fn tagged(name: &str, tags: &[&str]) -> String {
    if tags.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({})", tags.join(", "))
    }
}
