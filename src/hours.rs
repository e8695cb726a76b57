//! Opening-hours rows and "open now" evaluation.

use chrono::{NaiveTime, Weekday};

/// One typed opening-hours row for a café.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub day: Weekday,
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl OpeningHours {
    /// Parse a raw row with a localized day name and `HH:MM` times.
    ///
    /// Returns `None` when any field is unreadable.
    pub fn parse(day: &str, opens: &str, closes: &str) -> Option<Self> {
        Some(Self {
            day: parse_weekday(day)?,
            opens: parse_time(opens)?,
            closes: parse_time(closes)?,
        })
    }

    /// Whether `time` falls inside this row's interval, inclusive.
    /// An interval whose close precedes its open runs past midnight.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.closes < self.opens {
            time >= self.opens || time <= self.closes
        } else {
            time >= self.opens && time <= self.closes
        }
    }
}

/// Decide whether a café with `rows` is open on `day` at `time`.
///
/// Cafés without any row for `day` count as open.
pub fn is_open(rows: &[OpeningHours], day: Weekday, time: NaiveTime) -> bool {
    let mut today = rows.iter().filter(|row| row.day == day).peekable();
    if today.peek().is_none() {
        return true;
    }
    today.any(|row| row.contains(time))
}

/// Recognizes Spanish (with or without accents) and English day names.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let day = match name.trim().to_lowercase().as_str() {
        "lunes" | "monday" | "mon" => Weekday::Mon,
        "martes" | "tuesday" | "tue" => Weekday::Tue,
        "miércoles" | "miercoles" | "wednesday" | "wed" => Weekday::Wed,
        "jueves" | "thursday" | "thu" => Weekday::Thu,
        "viernes" | "friday" | "fri" => Weekday::Fri,
        "sábado" | "sabado" | "saturday" | "sat" => Weekday::Sat,
        "domingo" | "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}
