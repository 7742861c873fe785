use super::TravelRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<TravelRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<HistoryRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Trip Code", default, deserialize_with = "blank_as_none")]
    trip_code: Option<String>,
    #[serde(rename = "Origin", default, deserialize_with = "blank_as_none")]
    origin: Option<String>,
    #[serde(rename = "Destination", default, deserialize_with = "blank_as_none")]
    destination: Option<String>,
    #[serde(rename = "Airline", default, deserialize_with = "blank_as_none")]
    airline: Option<String>,
    #[serde(rename = "Hotel", default, deserialize_with = "blank_as_none")]
    hotel: Option<String>,
    #[serde(rename = "Flight Class", default, deserialize_with = "blank_as_none")]
    flight_class: Option<String>,
    #[serde(rename = "Rental Car", default, deserialize_with = "blank_as_none")]
    rental_car: Option<String>,
    #[serde(rename = "Trip Date", default, deserialize_with = "blank_as_none")]
    trip_date: Option<String>,
    #[serde(rename = "Total Cost", default, deserialize_with = "blank_as_none")]
    total_cost: Option<String>,
}

impl HistoryRow {
    fn into_record(self) -> TravelRecord {
        TravelRecord {
            trip_code: self.trip_code,
            origin: self.origin,
            destination: self.destination,
            airline: self.airline,
            hotel: self.hotel.map(|hotel| strip_invisible(&hotel)),
            flight_class: self.flight_class,
            rental_car: self.rental_car,
            trip_date: self.trip_date,
            total_cost: self.total_cost,
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

// Spreadsheet exports occasionally carry a BOM or zero-width spaces.
fn strip_invisible(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}
