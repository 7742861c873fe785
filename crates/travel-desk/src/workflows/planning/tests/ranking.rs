use super::common::*;
use crate::workflows::planning::preferences::PreferenceProfile;
use crate::workflows::planning::ranking::rank_options;

#[test]
fn direct_flight_beats_connecting_preferred_airline() {
    let profile = profile(&["Delta"], &[], &[]);
    let flights = vec![
        flight("Delta", 1, "3h 30m", 380),
        flight("JetBlue", 0, "2h 15m", 520),
    ];

    let ranked = rank_options(&flights, &profile);

    assert_eq!(ranked[0].airline, "JetBlue");
    assert_eq!(ranked[1].airline, "Delta");
}

#[test]
fn flights_order_by_preference_then_duration_then_price() {
    let profile = profile(&["United"], &[], &[]);
    let flights = vec![
        flight("Southwest", 0, "2h 0m", 300),
        flight("United", 0, "2h 30m", 500),
        flight("United", 0, "2h 30m", 450),
        flight("United", 0, "2h 10m", 610),
    ];

    let ranked = rank_options(&flights, &profile);
    let order: Vec<u32> = ranked.iter().map(|flight| flight.price).collect();

    assert_eq!(order, vec![610, 450, 500, 300]);
}

#[test]
fn unreadable_duration_sorts_as_three_hours() {
    let profile = PreferenceProfile::default();
    let flights = vec![
        flight("Delta", 0, "soon", 400),
        flight("United", 0, "2h 59m", 500),
        flight("American", 0, "3h 1m", 300),
    ];

    let ranked = rank_options(&flights, &profile);
    let order: Vec<&str> = ranked.iter().map(|flight| flight.airline.as_str()).collect();

    assert_eq!(order, vec!["United", "Delta", "American"]);
}

#[test]
fn hotels_and_cars_prefer_known_providers_then_cost() {
    let profile = profile(&[], &["Hilton"], &["National"]);
    let hotels = vec![
        hotel("Marriott", "Courtyard by Marriott Raleigh", 510),
        hotel("Hilton", "Hilton Raleigh", 720),
        hotel("Hilton", "Hampton Inn Raleigh Downtown", 540),
    ];
    let cars = vec![car("Enterprise", 195), car("National", 204)];

    let ranked_hotels = rank_options(&hotels, &profile);
    let ranked_cars = rank_options(&cars, &profile);

    let names: Vec<&str> = ranked_hotels.iter().map(|hotel| hotel.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Hampton Inn Raleigh Downtown",
            "Hilton Raleigh",
            "Courtyard by Marriott Raleigh"
        ]
    );
    assert_eq!(ranked_cars[0].company, "National");
}

#[test]
fn ranking_is_idempotent_and_stable() {
    let profile = profile(&["Delta"], &[], &[]);
    let flights = vec![
        flight("United", 0, "2h 10m", 450),
        flight("American", 0, "2h 10m", 450),
        flight("Delta", 1, "4h 0m", 400),
        flight("Delta", 0, "2h 10m", 470),
    ];

    let once = rank_options(&flights, &profile);
    let twice = rank_options(&once, &profile);

    assert_eq!(once, twice);
    // equal keys keep their input order
    assert_eq!(once[1].airline, "United");
    assert_eq!(once[2].airline, "American");
    assert_eq!(flights.len(), 4);
    assert_eq!(flights[0].airline, "United");
}

#[test]
fn empty_input_ranks_to_empty_output() {
    let ranked = rank_options::<crate::workflows::planning::CarOption>(
        &[],
        &PreferenceProfile::default(),
    );
    assert!(ranked.is_empty());
}
