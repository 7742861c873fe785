//! Preference-aware ordering of generated offers.
//!
//! Each offer type contributes a lexicographic key; lower keys rank first.
//! Sorting is stable, so equal keys keep their input order and re-ranking an
//! already ranked list is a no-op.

use super::domain::{CarOption, Candidate, FlightOption, HotelOption};
use super::preferences::PreferenceProfile;

const FALLBACK_DURATION_MINUTES: u32 = 180;

pub trait Rankable: Candidate + Clone {
    type Key: Ord;

    fn rank_key(&self, profile: &PreferenceProfile) -> Self::Key;
}

/// (connecting, non-preferred airline, duration minutes, price)
impl Rankable for FlightOption {
    type Key = (u8, u8, u32, u32);

    fn rank_key(&self, profile: &PreferenceProfile) -> Self::Key {
        (
            flag(!self.is_direct()),
            flag(!profile.prefers_airline(&self.airline)),
            duration_minutes(&self.duration),
            self.price,
        )
    }
}

/// (non-preferred brand, total price)
impl Rankable for HotelOption {
    type Key = (u8, u32);

    fn rank_key(&self, profile: &PreferenceProfile) -> Self::Key {
        (flag(!profile.prefers_hotel_brand(&self.brand)), self.total_price)
    }
}

/// (non-preferred company, total cost)
impl Rankable for CarOption {
    type Key = (u8, u32);

    fn rank_key(&self, profile: &PreferenceProfile) -> Self::Key {
        (
            flag(!profile.prefers_car_company(&self.company)),
            self.total_cost,
        )
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Returns a ranked copy of `candidates`; the input is left untouched.
pub fn rank_options<T: Rankable>(candidates: &[T], profile: &PreferenceProfile) -> Vec<T> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_cached_key(|candidate| candidate.rank_key(profile));
    ranked
}

/// Parse `"Xh Ym"` (minutes optional) into minutes; anything else counts as
/// three hours.
pub fn duration_minutes(text: &str) -> u32 {
    parse_duration(text).unwrap_or(FALLBACK_DURATION_MINUTES)
}

fn parse_duration(text: &str) -> Option<u32> {
    let (hours, rest) = text.split_once('h')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes = if rest.contains('m') {
        rest.replace('m', "").trim().parse::<u32>().ok()?
    } else {
        0
    };
    hours.checked_mul(60)?.checked_add(minutes)
}
