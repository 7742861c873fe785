use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::TravelDataError;

/// Loyalty memberships grouped by program type (`airline`, `hotel`, ...),
/// kept in the order the profile lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoyaltyPrograms(Vec<(String, Vec<String>)>);

impl LoyaltyPrograms {
    /// Add memberships under `kind`, extending the group if it already exists.
    pub fn insert(&mut self, kind: impl Into<String>, programs: Vec<String>) {
        let kind = kind.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == kind) {
            Some((_, group)) => group.extend(programs),
            None => self.0.push((kind, programs)),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(kind, programs)| (kind.as_str(), programs.as_slice()))
    }
}

impl Serialize for LoyaltyPrograms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, programs) in &self.0 {
            map.serialize_entry(kind, programs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LoyaltyPrograms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = LoyaltyPrograms;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of program type to membership names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut programs = LoyaltyPrograms::default();
                while let Some((kind, names)) = access.next_entry::<String, Vec<String>>()? {
                    programs.insert(kind, names);
                }
                Ok(programs)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Traveler profile kept alongside the trip history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelerProfile {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub travel_preferences: TravelPreferences,
    #[serde(default)]
    pub payment_info: PaymentInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default = "unknown_traveler")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: unknown_traveler(),
            email: None,
        }
    }
}

fn unknown_traveler() -> String {
    "Unknown User".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub loyalty_programs: LoyaltyPrograms,
}

/// Only a card label and its last digits are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub last_four: Option<String>,
}

impl PaymentInfo {
    pub fn masked_label(&self) -> String {
        let card = self.card_type.as_deref().unwrap_or("Corporate Card");
        match self.last_four.as_deref().map(last_digits) {
            Some(digits) if !digits.is_empty() => format!("{card} ending in {digits}"),
            _ => format!("{card} ending in ****"),
        }
    }
}

fn last_digits(value: &str) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

impl TravelerProfile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TravelDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TravelDataError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(profile) => {
                info!(traveler = %profile.personal_info.full_name, "loaded travel profile");
                profile
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "travel profile unavailable, using anonymous traveler");
                Self::default()
            }
        }
    }

    pub fn loyalty_programs(&self) -> impl Iterator<Item = &str> {
        self.travel_preferences
            .loyalty_programs
            .groups()
            .flat_map(|(_, programs)| programs.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_profile_and_loyalty_programs() {
        let json = r#"{
            "personal_info": {"full_name": "Jordan Avery", "email": "jordan@example.com"},
            "travel_preferences": {"loyalty_programs": {
                "airline": ["Delta SkyMiles Gold"],
                "hotel": ["Marriott Bonvoy Platinum"]
            }},
            "payment_info": {"card_type": "Corporate Amex", "last_four": "3782-8224-6310-005"}
        }"#;

        let profile = TravelerProfile::from_reader(Cursor::new(json)).expect("profile parses");

        assert_eq!(profile.personal_info.full_name, "Jordan Avery");
        assert_eq!(
            profile.loyalty_programs().collect::<Vec<_>>(),
            vec!["Delta SkyMiles Gold", "Marriott Bonvoy Platinum"]
        );
        assert_eq!(
            profile.payment_info.masked_label(),
            "Corporate Amex ending in 0005"
        );
    }

    #[test]
    fn loyalty_programs_keep_profile_order() {
        let json = r#"{"travel_preferences": {"loyalty_programs": {
            "hotel": ["Marriott Bonvoy"],
            "car_rental": ["Enterprise Plus"],
            "airline": ["Delta SkyMiles"]
        }}}"#;

        let profile = TravelerProfile::from_reader(Cursor::new(json)).expect("profile parses");

        let kinds: Vec<&str> = profile
            .travel_preferences
            .loyalty_programs
            .groups()
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(kinds, vec!["hotel", "car_rental", "airline"]);
        let encoded = serde_json::to_string(&profile.travel_preferences.loyalty_programs)
            .expect("programs encode");
        assert_eq!(
            encoded,
            r#"{"hotel":["Marriott Bonvoy"],"car_rental":["Enterprise Plus"],"airline":["Delta SkyMiles"]}"#
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let profile = TravelerProfile::from_reader(Cursor::new("{}")).expect("profile parses");
        assert_eq!(profile.personal_info.full_name, "Unknown User");
        assert_eq!(
            profile.payment_info.masked_label(),
            "Corporate Card ending in ****"
        );
    }

    #[test]
    fn unreadable_profile_falls_back() {
        let profile = TravelerProfile::load_or_default("./no-profile-here.json");
        assert_eq!(profile, TravelerProfile::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(TravelerProfile::from_reader(Cursor::new("{not json")).is_err());
    }
}
