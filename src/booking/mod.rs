//! Appointment booking: file-backed appointment lists, the per-interaction
//! booking session, slot helpers and preparation notes.

pub mod book;
pub mod prep;
pub mod session;
pub mod slots;
pub mod store;

pub use book::*;
pub use prep::*;
pub use session::*;
pub use slots::*;
pub use store::*;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored list '{key}' is not valid JSON: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No appointment at position {index}")]
    NotFound { index: usize },

    #[error("Invalid time slot: {0}")]
    InvalidTime(String),

    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Date {0} is not bookable")]
    UnavailableDate(NaiveDate),

    #[error("Booking needs both a date and a time")]
    IncompleteSelection,

    #[error("Calendar link error: {0}")]
    CalendarLink(String),
}
