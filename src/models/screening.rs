use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Seats in a screening room when the backend sends no grid of its own.
pub const TOTAL_TICKETS: u32 = 40;
pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLUMNS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: i64,
    pub movie_id: i64,
    pub tickets_remaining: u32,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    /// `seats[row][column]` is `true` when the seat is already booked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seats: Vec<Vec<bool>>,
}

impl Screening {
    /// Booked-seat grid, falling back to an empty default room.
    pub fn seat_grid(&self) -> Vec<Vec<bool>> {
        if self.seats.is_empty() {
            vec![vec![false; DEFAULT_COLUMNS]; DEFAULT_ROWS]
        } else {
            self.seats.clone()
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.tickets_remaining == 0
    }
}

/// `HH:MM` on the way out, `HH:MM` or `HH:MM:SS` on the way in.
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, FORMAT))
    }
}
