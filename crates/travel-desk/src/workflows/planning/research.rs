use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restaurant {
    pub name: &'static str,
    pub description: &'static str,
    pub area: &'static str,
    pub price_level: &'static str,
    pub rating: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityGroup {
    pub category: &'static str,
    pub items: Vec<&'static str>,
}

/// Destination intelligence attached to every plan. The content is static
/// until a live weather or advisory feed is wired in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationBrief {
    pub destination: String,
    pub travel_date: String,
    pub weather: Vec<String>,
    pub advisory: Vec<&'static str>,
    pub restaurants: Vec<Restaurant>,
    pub things_to_do: Vec<ActivityGroup>,
    pub airport_transfer: Vec<&'static str>,
    pub getting_around: Vec<&'static str>,
    pub transport_recommendation: &'static str,
}

impl DestinationBrief {
    pub fn research(destination: &str, travel_date: &str) -> Self {
        Self {
            destination: destination.to_string(),
            travel_date: travel_date.to_string(),
            weather: vec![
                format!("Expected conditions around {travel_date}:"),
                "Temperature: 65-75°F (18-24°C)".to_string(),
                "Conditions: Partly cloudy".to_string(),
                "Precipitation: 20% chance".to_string(),
                "Recommendation: Pack layers and a light jacket".to_string(),
            ],
            advisory: vec![
                "No current travel warnings or advisories",
                "Exercise normal precautions",
                "Check local health guidelines",
                "Ensure travel documents are current",
            ],
            restaurants: vec![
                Restaurant {
                    name: "The Capital Grille",
                    description: "Upscale steakhouse, perfect for business dinners",
                    area: "Downtown",
                    price_level: "$$$$",
                    rating: "4.6/5",
                },
                Restaurant {
                    name: "Nobu",
                    description: "Contemporary Japanese, great for client entertainment",
                    area: "Business District",
                    price_level: "$$$$",
                    rating: "4.5/5",
                },
                Restaurant {
                    name: "Local Bistro",
                    description: "Farm-to-table American, casual business lunch",
                    area: "Near convention center",
                    price_level: "$$$",
                    rating: "4.4/5",
                },
                Restaurant {
                    name: "Sushi Den",
                    description: "Fresh sushi, quick lunch option",
                    area: "Walking distance from hotels",
                    price_level: "$$",
                    rating: "4.3/5",
                },
                Restaurant {
                    name: "Italian Kitchen",
                    description: "Classic Italian, group dinners",
                    area: "Downtown",
                    price_level: "$$$",
                    rating: "4.5/5",
                },
            ],
            things_to_do: vec![
                ActivityGroup {
                    category: "Cultural Attractions",
                    items: vec![
                        "Local Museum of Art - 20 min from downtown",
                        "Historic District Walking Tour - Self-guided available",
                    ],
                },
                ActivityGroup {
                    category: "City Highlights",
                    items: vec![
                        "Observation Deck - Best city views, open till 10pm",
                        "Waterfront District - Evening stroll, restaurants",
                    ],
                },
                ActivityGroup {
                    category: "Entertainment",
                    items: vec![
                        "Theater District - Check current shows",
                        "Live Music Venues - Jazz clubs, local bands",
                    ],
                },
                ActivityGroup {
                    category: "Fitness & Recreation",
                    items: vec![
                        "Riverside Running Trail - 5K loop",
                        "City Gym (Day passes available)",
                    ],
                },
            ],
            airport_transfer: vec![
                "Taxi/Uber/Lyft: ~$35-45, 25-30 mins",
                "Airport Shuttle: $18, 40 mins (shared)",
                "Public Transit: $5, 45 mins (train + walk)",
                "Hotel Shuttle: Check with hotel (often free)",
            ],
            getting_around: vec![
                "Metro/Subway: $2.50/ride, extensive coverage",
                "Bus System: $2.00/ride, connects major areas",
                "Rideshare: Most convenient for business meetings",
                "Bike Share: $8/day pass available",
            ],
            transport_recommendation:
                "For business travel, rideshare services offer best flexibility. \
                 Consider public transit if the hotel is near a metro station.",
        }
    }

    pub fn weather_markdown(&self) -> String {
        let mut lines = vec![format!("**Weather Forecast for {}:**", self.destination)];
        lines.extend(self.weather.iter().map(|line| format!("- {line}")));
        lines.push("*Check closer to departure for an updated forecast*".to_string());
        lines.join("\n")
    }

    pub fn advisory_markdown(&self) -> String {
        let mut lines = vec![format!("**Travel Advisory for {}:**", self.destination)];
        lines.extend(self.advisory.iter().map(|line| format!("- {line}")));
        lines.join("\n")
    }

    pub fn restaurants_markdown(&self) -> String {
        let mut lines = vec![format!("**{} - Top Rated Restaurants:**\n", self.destination)];
        for (index, restaurant) in self.restaurants.iter().enumerate() {
            lines.push(format!(
                "{}. **{}** - {}",
                index + 1,
                restaurant.name,
                restaurant.description
            ));
            lines.push(format!(
                "   {} | {} | {}",
                restaurant.area, restaurant.price_level, restaurant.rating
            ));
        }
        lines.push("\n*Reservations recommended for upscale venues*".to_string());
        lines.join("\n")
    }

    pub fn things_to_do_markdown(&self) -> String {
        let mut lines = vec![format!("**Things to Do in {}:**", self.destination)];
        for group in &self.things_to_do {
            lines.push(format!("\n**{}:**", group.category));
            lines.extend(group.items.iter().map(|item| format!("- {item}")));
        }
        lines.join("\n")
    }

    pub fn ground_transport_markdown(&self) -> String {
        let mut lines = vec![
            format!("**Ground Transportation in {}:**", self.destination),
            "\n**From Airport to Downtown:**".to_string(),
        ];
        lines.extend(self.airport_transfer.iter().map(|line| format!("- {line}")));
        lines.push("\n**Getting Around:**".to_string());
        lines.extend(self.getting_around.iter().map(|line| format!("- {line}")));
        lines.push(format!("\n**Recommendation:** {}", self.transport_recommendation));
        lines.join("\n")
    }

    /// All sections separated by horizontal rules.
    pub fn to_markdown(&self) -> String {
        [
            format!("# Destination Intelligence: {}", self.destination),
            self.weather_markdown(),
            self.advisory_markdown(),
            self.restaurants_markdown(),
            self.things_to_do_markdown(),
            self.ground_transport_markdown(),
        ]
        .join("\n\n---\n\n")
    }
}
