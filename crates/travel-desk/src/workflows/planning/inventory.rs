//! Offer generation. The planner only talks to [`InventorySource`]; the
//! bundled [`MockInventory`] produces realistic but synthetic fares.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{CarOption, FlightOption, HotelOption, TripRequest};

pub trait InventorySource: Send + Sync {
    fn search_flights(&self, request: &TripRequest) -> Vec<FlightOption>;
    fn search_hotels(&self, request: &TripRequest) -> Vec<HotelOption>;
    fn search_cars(&self, request: &TripRequest) -> Vec<CarOption>;
}

struct Carrier {
    name: &'static str,
    code: &'static str,
    price_multiplier: f64,
}

const CARRIERS: [Carrier; 5] = [
    Carrier { name: "Delta", code: "DL", price_multiplier: 1.0 },
    Carrier { name: "United", code: "UA", price_multiplier: 1.08 },
    Carrier { name: "American", code: "AA", price_multiplier: 1.05 },
    Carrier { name: "Southwest", code: "WN", price_multiplier: 0.92 },
    Carrier { name: "JetBlue", code: "B6", price_multiplier: 0.95 },
];

const ROUTE_MILES: [(&str, &str, u32); 8] = [
    ("Chicago", "New York", 790),
    ("Chicago", "San Francisco", 1850),
    ("Chicago", "Los Angeles", 1745),
    ("Chicago", "Miami", 1200),
    ("Chicago", "Seattle", 1735),
    ("Dallas", "Raleigh", 1050),
    ("Dallas", "New York", 1380),
    ("Dallas", "Los Angeles", 1240),
];

const DEFAULT_ROUTE_MILES: u32 = 1000;
const CRUISE_MPH: f64 = 500.0;
const BASE_ROUND_TRIP_FARE: f64 = 450.0;
const NORMAL_FARE_SHARE: f64 = 0.8;
const DIRECT_SHARE: f64 = 0.7;
const CONNECTING_DISCOUNT: f64 = 0.92;
const DEPARTURE_HOURS: [u32; 7] = [6, 8, 10, 13, 15, 18, 20];

struct HotelTemplate {
    brand: &'static str,
    name_prefix: &'static str,
    name_suffix: &'static str,
    stars: u8,
    rate_range: (u32, u32),
    corporate_rate: bool,
    rate_type: &'static str,
}

const HOTELS: [HotelTemplate; 5] = [
    HotelTemplate {
        brand: "Marriott",
        name_prefix: "Courtyard by Marriott",
        name_suffix: "",
        stars: 3,
        rate_range: (165, 185),
        corporate_rate: true,
        rate_type: "Corporate Rate",
    },
    HotelTemplate {
        brand: "Hilton",
        name_prefix: "Hampton Inn",
        name_suffix: " Downtown",
        stars: 3,
        rate_range: (170, 195),
        corporate_rate: true,
        rate_type: "Corporate Rate",
    },
    HotelTemplate {
        brand: "Marriott",
        name_prefix: "Marriott",
        name_suffix: " Downtown",
        stars: 4,
        rate_range: (220, 260),
        corporate_rate: false,
        rate_type: "Standard Rate",
    },
    HotelTemplate {
        brand: "Hilton",
        name_prefix: "Hilton",
        name_suffix: "",
        stars: 4,
        rate_range: (230, 270),
        corporate_rate: false,
        rate_type: "Standard Rate",
    },
    HotelTemplate {
        brand: "Hyatt",
        name_prefix: "Hyatt Regency",
        name_suffix: "",
        stars: 4,
        rate_range: (280, 320),
        corporate_rate: false,
        rate_type: "Premium",
    },
];

const RENTAL_COMPANIES: [(&str, i32); 3] = [("Hertz", 72), ("Enterprise", 65), ("National", 68)];

const VEHICLES: [(&str, [&str; 3]); 2] = [
    ("Compact", ["Toyota Corolla", "Honda Civic", "Nissan Sentra"]),
    ("Mid-size", ["Toyota Camry", "Honda Accord", "Chevrolet Malibu"]),
];

const CAR_DAILY_CAP: i32 = 75;

/// Randomized inventory in the shape of a real fare search.
pub struct MockInventory {
    rng: Mutex<StdRng>,
}

impl MockInventory {
    /// Reproducible inventory for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockInventory {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl InventorySource for MockInventory {
    /// Sorted by price.
    fn search_flights(&self, request: &TripRequest) -> Vec<FlightOption> {
        let mut rng = self.rng();
        let flight_hours = f64::from(route_miles(&request.origin, &request.destination)) / CRUISE_MPH;

        let mut flights: Vec<FlightOption> = CARRIERS
            .iter()
            .map(|carrier| {
                let fare_band = if rng.random::<f64>() < NORMAL_FARE_SHARE {
                    rng.random_range(0.88..1.12)
                } else {
                    rng.random_range(1.5..1.9)
                };
                let mut price = BASE_ROUND_TRIP_FARE * carrier.price_multiplier * fare_band;

                let flight_number = format!("{}{}", carrier.code, rng.random_range(100..=999));
                let depart_hour = DEPARTURE_HOURS[rng.random_range(0..DEPARTURE_HOURS.len())];
                let arrive_hour = (depart_hour + flight_hours as u32) % 24;

                let (stops, elapsed) = if rng.random_bool(DIRECT_SHARE) {
                    (0, flight_hours)
                } else {
                    price = price.trunc() * CONNECTING_DISCOUNT;
                    (1, flight_hours + rng.random_range(1.5..3.0))
                };

                FlightOption {
                    airline: carrier.name.to_string(),
                    flight_number,
                    depart_time: format!(
                        "{} {depart_hour:02}:{:02}",
                        request.depart_date,
                        rng.random_range(0..60)
                    ),
                    arrive_time: format!(
                        "{} {arrive_hour:02}:{:02}",
                        request.depart_date,
                        rng.random_range(0..60)
                    ),
                    price: price as u32,
                    cabin_class: "Economy".to_string(),
                    stops,
                    duration: format_duration(elapsed),
                }
            })
            .collect();

        flights.sort_by_key(|flight| flight.price);
        flights
    }

    /// Sorted by total price, which puts corporate rates first.
    fn search_hotels(&self, request: &TripRequest) -> Vec<HotelOption> {
        let mut rng = self.rng();
        let nights = request.stay_length();
        let destination = request.destination.as_str();

        let mut hotels: Vec<HotelOption> = HOTELS
            .iter()
            .map(|template| {
                let nightly_rate = rng.random_range(template.rate_range.0..=template.rate_range.1);

                let mut amenities = vec![
                    "WiFi".to_string(),
                    "Gym".to_string(),
                    "Business Center".to_string(),
                ];
                if template.stars >= 4 {
                    amenities.push("Restaurant".to_string());
                    amenities.push("Room Service".to_string());
                }
                if template.corporate_rate {
                    amenities.push("Corporate Discount Applied".to_string());
                }

                HotelOption {
                    name: format!(
                        "{} {destination}{}",
                        template.name_prefix, template.name_suffix
                    ),
                    brand: template.brand.to_string(),
                    stars: template.stars,
                    nightly_rate,
                    nights,
                    total_price: nightly_rate.saturating_mul(nights),
                    location: format!("{destination} Downtown"),
                    amenities,
                    corporate_rate: template.corporate_rate,
                    rate_type: template.rate_type.to_string(),
                    distance_to_center: format!("{:.1} mi", 0.3 + rng.random::<f64>() * 1.5),
                }
            })
            .collect();

        hotels.sort_by_key(|hotel| hotel.total_price);
        hotels
    }

    /// Sorted by total cost.
    fn search_cars(&self, request: &TripRequest) -> Vec<CarOption> {
        let mut rng = self.rng();
        let days = request.stay_length();

        let mut cars: Vec<CarOption> = RENTAL_COMPANIES
            .iter()
            .map(|(company, base_rate)| {
                let (vehicle_class, models) = VEHICLES[rng.random_range(0..VEHICLES.len())];
                let model = models[rng.random_range(0..models.len())];
                let daily_rate = (base_rate + rng.random_range(-3..=3)).min(CAR_DAILY_CAP);
                let daily_rate = u32::try_from(daily_rate).unwrap_or_default();

                CarOption {
                    company: company.to_string(),
                    vehicle_class: vehicle_class.to_string(),
                    model: format!("{model} or similar"),
                    daily_rate,
                    days,
                    total_cost: daily_rate.saturating_mul(days),
                    location: format!("{} Airport", request.destination),
                    unlimited_miles: true,
                    preferred: true,
                    policy_compliant: daily_rate <= CAR_DAILY_CAP as u32,
                }
            })
            .collect();

        cars.sort_by_key(|car| car.total_cost);
        cars
    }
}

/// Known route mileage in either direction, else a 1000-mile default.
pub fn route_miles(origin: &str, destination: &str) -> u32 {
    ROUTE_MILES
        .iter()
        .find(|(from, to, _)| {
            (*from == origin && *to == destination) || (*from == destination && *to == origin)
        })
        .map(|(_, _, miles)| *miles)
        .unwrap_or(DEFAULT_ROUTE_MILES)
}

fn format_duration(hours: f64) -> String {
    let whole = hours.trunc();
    let minutes = ((hours - whole) * 60.0).trunc();
    format!("{}h {}m", whole as u32, minutes as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::planning::domain::Budget;
    use crate::workflows::planning::ranking::duration_minutes;

    fn request(origin: &str, destination: &str) -> TripRequest {
        TripRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            depart_date: "2025-11-05".to_string(),
            return_date: "2025-11-08".to_string(),
            purpose: Some("Client workshop".to_string()),
            budget: Budget::Amount(1800.0),
        }
    }

    #[test]
    fn route_lookup_is_symmetric_with_default() {
        assert_eq!(route_miles("Dallas", "Raleigh"), 1050);
        assert_eq!(route_miles("Raleigh", "Dallas"), 1050);
        assert_eq!(route_miles("Boston", "Denver"), 1000);
    }

    #[test]
    fn durations_render_whole_hours_and_minutes() {
        assert_eq!(format_duration(1.58), "1h 34m");
        assert_eq!(format_duration(2.0), "2h 0m");
    }

    #[test]
    fn seeded_inventory_is_reproducible() {
        let trip = request("Chicago", "New York");
        let first = MockInventory::seeded(7);
        let second = MockInventory::seeded(7);

        assert_eq!(first.search_flights(&trip), second.search_flights(&trip));
        assert_eq!(first.search_hotels(&trip), second.search_hotels(&trip));
        assert_eq!(first.search_cars(&trip), second.search_cars(&trip));
    }

    #[test]
    fn flights_cover_every_carrier_sorted_by_price() {
        let inventory = MockInventory::seeded(42);
        let flights = inventory.search_flights(&request("Dallas", "Raleigh"));

        assert_eq!(flights.len(), 5);
        assert!(flights.windows(2).all(|pair| pair[0].price <= pair[1].price));
        for flight in &flights {
            assert_eq!(flight.cabin_class, "Economy");
            assert!(flight.stops <= 1);
            assert!(flight.depart_time.starts_with("2025-11-05 "));
            assert!(duration_minutes(&flight.duration) >= 120);
            // 450 * 1.08 * 1.9 is the ceiling for any carrier
            assert!(flight.price < 924);
        }
    }

    #[test]
    fn hotels_price_by_stay_length() {
        let inventory = MockInventory::seeded(3);
        let hotels = inventory.search_hotels(&request("Chicago", "Raleigh"));

        assert_eq!(hotels.len(), 5);
        assert!(hotels.windows(2).all(|pair| pair[0].total_price <= pair[1].total_price));
        for hotel in &hotels {
            assert_eq!(hotel.nights, 3);
            assert_eq!(hotel.total_price, hotel.nightly_rate * 3);
            assert_eq!(hotel.location, "Raleigh Downtown");
            assert_eq!(
                hotel.corporate_rate,
                hotel.amenities.iter().any(|a| a == "Corporate Discount Applied")
            );
        }
        assert!(hotels.iter().any(|hotel| hotel.name == "Hampton Inn Raleigh Downtown"));
    }

    #[test]
    fn cars_stay_under_the_daily_cap() {
        let inventory = MockInventory::seeded(11);
        let cars = inventory.search_cars(&request("Chicago", "Seattle"));

        assert_eq!(cars.len(), 3);
        for car in &cars {
            assert!(car.daily_rate <= 75);
            assert!(car.daily_rate >= 62);
            assert!(car.policy_compliant);
            assert!(car.model.ends_with(" or similar"));
            assert_eq!(car.location, "Seattle Airport");
            assert_eq!(car.total_cost, car.daily_rate * 3);
        }
    }
}
