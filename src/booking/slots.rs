//! Calendar day availability and consultation time slots.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::BookingError;

/// Every consultation slot, in chronological order.
pub const ALL_TIME_SLOTS: &[&str] = &[
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM",
];

/// Bounds for the number of slots offered on a day.
pub const MIN_OFFERED_SLOTS: usize = 4;
pub const MAX_OFFERED_SLOTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayAvailability {
    Past,
    Weekend,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub availability: DayAvailability,
    pub is_today: bool,
}

/// Parse a 12-hour slot label such as "1:30 PM".
pub fn parse_slot(time: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(time.trim(), "%I:%M %p")
        .map_err(|_| BookingError::InvalidTime(time.to_string()))
}

/// "1:30 PM" → "13:30:00", "12:15 AM" → "00:15:00".
pub fn to_24_hour(time: &str) -> Result<String, BookingError> {
    Ok(parse_slot(time)?.format("%H:%M:%S").to_string())
}

/// A random selection of 4–6 slots, sorted chronologically.
pub fn sample_time_slots<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let count = rng.gen_range(MIN_OFFERED_SLOTS..=MAX_OFFERED_SLOTS);
    let mut offered: Vec<&'static str> = ALL_TIME_SLOTS.choose_multiple(rng, count).copied().collect();
    // Labels in ALL_TIME_SLOTS always parse.
    offered.sort_by_key(|slot| parse_slot(slot).ok());
    offered
}

pub fn is_bookable(date: NaiveDate, today: NaiveDate) -> bool {
    availability_of(date, today) == DayAvailability::Available
}

fn availability_of(date: NaiveDate, today: NaiveDate) -> DayAvailability {
    if date < today {
        DayAvailability::Past
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayAvailability::Weekend
    } else {
        DayAvailability::Available
    }
}

/// Every day of a month (1-based `month`) with its booking availability.
pub fn day_availability(year: i32, month: u32, today: NaiveDate) -> Result<Vec<CalendarDay>, BookingError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(BookingError::InvalidMonth { year, month })?;

    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| CalendarDay {
            date,
            availability: availability_of(date, today),
            is_today: date == today,
        })
        .collect())
}

/// Whether navigating back from `(year, month)` stays at or after `start`.
pub fn can_go_back(year: i32, month: u32, start: NaiveDate) -> bool {
    (year, month) > (start.year(), start.month())
}
