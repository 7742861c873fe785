use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const FALLBACK_STAY_LENGTH: u32 = 3;

/// Trip budget as supplied by the traveler. Parsing never fails; unusable
/// input is kept so the compliance notes can say so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Budget {
    Absent,
    Amount(f64),
    Unparsable(String),
}

impl Budget {
    pub fn from_text(raw: Option<&str>) -> Self {
        match raw {
            None => Budget::Absent,
            Some(text) => match text.trim().parse::<f64>() {
                Ok(amount) if !amount.is_nan() => Budget::Amount(amount),
                _ => Budget::Unparsable(text.to_string()),
            },
        }
    }

    /// Accepts JSON numbers and numeric strings alike.
    pub fn from_json(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Budget::Absent,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(amount) if !amount.is_nan() => Budget::Amount(amount),
                _ => Budget::Unparsable(number.to_string()),
            },
            Some(Value::String(text)) => Budget::from_text(Some(text.as_str())),
            Some(other) => Budget::Unparsable(other.to_string()),
        }
    }

    /// Amount used by the policy check. An absent budget counts as zero.
    pub fn checked_amount(&self) -> Option<f64> {
        match self {
            Budget::Absent => Some(0.0),
            Budget::Amount(amount) => Some(*amount),
            Budget::Unparsable(_) => None,
        }
    }
}

/// Loosely typed trip request as it arrives over HTTP or from the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripRequestPayload {
    #[serde(default)]
    pub user_query: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub depart_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub budget: Option<Value>,
}

/// Validated trip request consumed by the planning core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: String,
    pub purpose: Option<String>,
    pub budget: Budget,
}

impl TripRequest {
    /// The business purpose, or `None` when it is missing or blank.
    pub fn business_purpose(&self) -> Option<&str> {
        self.purpose
            .as_deref()
            .map(str::trim)
            .filter(|purpose| !purpose.is_empty())
    }

    /// Nights between departure and return. Same-day or inverted ranges count
    /// as one night; unreadable dates fall back to three.
    pub fn stay_length(&self) -> u32 {
        let depart = NaiveDate::parse_from_str(self.depart_date.trim(), DATE_FORMAT);
        let back = NaiveDate::parse_from_str(self.return_date.trim(), DATE_FORMAT);
        match (depart, back) {
            (Ok(depart), Ok(back)) => {
                let days = (back - depart).num_days();
                if days > 0 {
                    u32::try_from(days).unwrap_or(u32::MAX)
                } else {
                    1
                }
            }
            _ => FALLBACK_STAY_LENGTH,
        }
    }
}

impl From<TripRequestPayload> for TripRequest {
    fn from(payload: TripRequestPayload) -> Self {
        let purpose = non_blank(payload.purpose).or_else(|| non_blank(payload.user_query));
        let budget = Budget::from_json(payload.budget.as_ref());

        TripRequest {
            origin: payload.origin.unwrap_or_default().trim().to_string(),
            destination: payload.destination.unwrap_or_default().trim().to_string(),
            depart_date: payload.depart_date.unwrap_or_default().trim().to_string(),
            return_date: payload.return_date.unwrap_or_default().trim().to_string(),
            purpose,
            budget,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Shared view over any generated travel offer.
pub trait Candidate {
    /// Airline, hotel brand, or rental company used for preference matching.
    fn provider(&self) -> &str;
    /// Total price of the offer in whole dollars.
    fn cost(&self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub flight_number: String,
    pub depart_time: String,
    pub arrive_time: String,
    pub price: u32,
    pub cabin_class: String,
    pub stops: u8,
    /// Free text such as `"2h 10m"`.
    pub duration: String,
}

impl FlightOption {
    pub fn is_direct(&self) -> bool {
        self.stops == 0
    }
}

impl Candidate for FlightOption {
    fn provider(&self) -> &str {
        &self.airline
    }

    fn cost(&self) -> u32 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub brand: String,
    pub stars: u8,
    pub nightly_rate: u32,
    pub nights: u32,
    pub total_price: u32,
    pub location: String,
    pub amenities: Vec<String>,
    pub corporate_rate: bool,
    pub rate_type: String,
    pub distance_to_center: String,
}

impl Candidate for HotelOption {
    fn provider(&self) -> &str {
        &self.brand
    }

    fn cost(&self) -> u32 {
        self.total_price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarOption {
    pub company: String,
    pub vehicle_class: String,
    pub model: String,
    pub daily_rate: u32,
    pub days: u32,
    pub total_cost: u32,
    pub location: String,
    pub unlimited_miles: bool,
    pub preferred: bool,
    pub policy_compliant: bool,
}

impl Candidate for CarOption {
    fn provider(&self) -> &str {
        &self.company
    }

    fn cost(&self) -> u32 {
        self.total_cost
    }
}

/// Render a dollar amount rounded to whole dollars with thousands separators,
/// e.g. `2500.0` becomes `"$2,500"`. Halves round to even.
pub fn whole_dollars(amount: f64) -> String {
    if amount.is_infinite() {
        return if amount > 0.0 { "unlimited" } else { "-unlimited" }.to_string();
    }
    let digits = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && digits != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// Same as [`whole_dollars`] but with cents, e.g. `"$1,234.50"`.
pub fn dollars_and_cents(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(depart: &str, back: &str) -> TripRequest {
        TripRequest {
            origin: "Dallas".to_string(),
            destination: "Raleigh".to_string(),
            depart_date: depart.to_string(),
            return_date: back.to_string(),
            purpose: None,
            budget: Budget::Absent,
        }
    }

    #[test]
    fn budget_parsing_degrades_instead_of_failing() {
        assert_eq!(Budget::from_text(Some(" 1500 ")), Budget::Amount(1500.0));
        assert_eq!(Budget::from_text(None), Budget::Absent);
        assert_eq!(
            Budget::from_text(Some("about a grand")),
            Budget::Unparsable("about a grand".to_string())
        );
        assert!(matches!(Budget::from_text(Some("NaN")), Budget::Unparsable(_)));
        assert_eq!(Budget::from_text(Some("1e400")), Budget::Amount(f64::INFINITY));
        assert_eq!(Budget::from_text(Some("inf")), Budget::Amount(f64::INFINITY));
        assert_eq!(Budget::from_json(Some(&json!(950))), Budget::Amount(950.0));
        assert_eq!(Budget::from_json(Some(&json!("2500"))), Budget::Amount(2500.0));
        assert!(matches!(
            Budget::from_json(Some(&json!(true))),
            Budget::Unparsable(_)
        ));
        assert_eq!(Budget::Absent.checked_amount(), Some(0.0));
    }

    #[test]
    fn stay_length_handles_bad_and_inverted_dates() {
        assert_eq!(request("2025-11-05", "2025-11-08").stay_length(), 3);
        assert_eq!(request("2025-11-05", "2025-11-05").stay_length(), 1);
        assert_eq!(request("2025-11-08", "2025-11-05").stay_length(), 1);
        assert_eq!(request("next week", "2025-11-05").stay_length(), 3);
        assert_eq!(request("2025-11-01", "2025-11-06").stay_length(), 5);
    }

    #[test]
    fn payload_falls_back_to_user_query_for_purpose() {
        let payload = TripRequestPayload {
            user_query: Some("Visit the NYC office for client meetings".to_string()),
            origin: Some(" Chicago ".to_string()),
            destination: Some("New York".to_string()),
            purpose: Some("   ".to_string()),
            budget: Some(json!("1200")),
            ..TripRequestPayload::default()
        };

        let request = TripRequest::from(payload);

        assert_eq!(request.origin, "Chicago");
        assert_eq!(
            request.business_purpose(),
            Some("Visit the NYC office for client meetings")
        );
        assert_eq!(request.budget, Budget::Amount(1200.0));
    }

    #[test]
    fn dollar_formatting_groups_thousands() {
        assert_eq!(whole_dollars(2500.0), "$2,500");
        assert_eq!(whole_dollars(999.6), "$1,000");
        assert_eq!(whole_dollars(1234567.0), "$1,234,567");
        assert_eq!(whole_dollars(0.0), "$0");
        assert_eq!(whole_dollars(1500.5), "$1,500");
        assert_eq!(whole_dollars(2501.5), "$2,502");
        assert_eq!(whole_dollars(f64::INFINITY), "unlimited");
        assert_eq!(dollars_and_cents(1387.5), "$1,387.50");
        assert_eq!(dollars_and_cents(12.0), "$12.00");
    }
}
