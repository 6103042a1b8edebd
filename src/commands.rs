//! Slash commands and the step-by-step booking flow of the terminal chat.
//!
//! A booking runs over several lines: `/book Doctor - Specialty` opens it,
//! then the user enters a date, then one of the offered slots. While a
//! booking is open, plain lines go to it instead of the chat responder.

use chrono::{Datelike, NaiveDate};
use rand::Rng;

use crate::booking::{
    calendar_url, can_go_back, day_availability, preparation_instructions, time_until_label,
    AppointmentBook, BookingError, BookingSession, DayAvailability, LOCATION_PLACEHOLDER,
};
use crate::chat::ConversationContext;
use crate::models::Appointment;

pub const HELP_TEXT: &str = "Commands: /book <Doctor - Specialty>, /appointments, \
     /calendar <number>, /reschedule <number>, /cancel <number>, /stop, /reset, /quit";

const DATE_PROMPT: &str =
    "Enter a date (YYYY-MM-DD), 'next' or 'prev' to change month, or /stop to abandon.";

/// A booking in progress and the month currently shown.
struct PendingBooking {
    session: BookingSession,
    year: i32,
    month: u32,
}

/// State of one terminal session.
pub struct CliState {
    book: AppointmentBook,
    ctx: ConversationContext,
    pending: Option<PendingBooking>,
    today: NaiveDate,
}

impl CliState {
    pub fn new(book: AppointmentBook, today: NaiveDate) -> Self {
        Self {
            book,
            ctx: ConversationContext::new(),
            pending: None,
            today,
        }
    }

    pub fn book(&self) -> &AppointmentBook {
        &self.book
    }

    pub fn context(&self) -> &ConversationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ConversationContext {
        &mut self.ctx
    }

    pub fn is_booking(&self) -> bool {
        self.pending.is_some()
    }

    /// Run one command (text after the `/`). `None` ends the session.
    pub fn command(&mut self, command: &str) -> Result<Option<String>, BookingError> {
        let command = command.trim();
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));

        let text = match name {
            "quit" | "exit" => return Ok(None),
            "reset" => {
                self.ctx.clear();
                self.pending = None;
                "Conversation cleared.".to_string()
            }
            "appointments" => self.list_appointments()?,
            "book" if arg.is_empty() => "Usage: /book <Doctor - Specialty>".to_string(),
            "book" => {
                let session = BookingSession::from_label(arg);
                let intro = format!("Booking with {} ({}).", session.doctor_name(), session.specialty());
                self.start_booking(session, &intro)?
            }
            "stop" => match self.pending.take() {
                Some(_) => "Booking abandoned.".to_string(),
                None => "No booking in progress.".to_string(),
            },
            "cancel" | "calendar" | "reschedule" => match parse_position(arg) {
                Some(n) => match self.appointment_command(name, n - 1) {
                    Err(BookingError::NotFound { .. }) => format!("No appointment #{n}."),
                    other => other?,
                },
                None => format!("Usage: /{name} <number>"),
            },
            _ => HELP_TEXT.to_string(),
        };
        Ok(Some(text))
    }

    /// Feed a plain line to the open booking.
    pub fn booking_input<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        rng: &mut R,
    ) -> Result<String, BookingError> {
        let today = self.today;
        let Some(pending) = self.pending.as_mut() else {
            return Ok("No booking in progress.".to_string());
        };
        let input = input.trim();

        if input.eq_ignore_ascii_case("next") {
            (pending.year, pending.month) = next_month(pending.year, pending.month);
            return month_overview(pending.year, pending.month, today);
        }
        if input.eq_ignore_ascii_case("prev") {
            if !can_go_back(pending.year, pending.month, today) {
                return Ok("This is the earliest month you can book.".to_string());
            }
            (pending.year, pending.month) = previous_month(pending.year, pending.month);
            return month_overview(pending.year, pending.month, today);
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return match pending.session.select_date(date, today, rng) {
                Ok(slots) => {
                    let slots = slots.join(", ");
                    pending.year = date.year();
                    pending.month = date.month();
                    Ok(format!("{}: {slots}", pending.session.confirm_label()))
                }
                Err(BookingError::UnavailableDate(_)) => Ok(format!(
                    "{date} is not available. Pick a weekday from today onward."
                )),
                Err(e) => Err(e),
            };
        }

        if pending.session.selected_date().is_none() {
            return Ok(DATE_PROMPT.to_string());
        }

        match pending.session.select_time(input) {
            Ok(()) => {}
            Err(BookingError::InvalidTime(_)) => {
                return Ok(format!(
                    "Please pick one of: {}",
                    pending.session.offered_slots().join(", ")
                ));
            }
            Err(e) => return Err(e),
        }

        let new = pending.session.confirm()?;
        let appointment = self.book.book(new, rng)?;
        self.pending = None;
        Ok(confirmation_text(&appointment))
    }

    fn start_booking(&mut self, session: BookingSession, intro: &str) -> Result<String, BookingError> {
        let (year, month) = (self.today.year(), self.today.month());
        let overview = month_overview(year, month, self.today)?;
        self.pending = Some(PendingBooking {
            session,
            year,
            month,
        });
        Ok(format!("{intro}\n\n{overview}\n\n{DATE_PROMPT}"))
    }

    fn appointment_command(&mut self, name: &str, index: usize) -> Result<String, BookingError> {
        match name {
            "cancel" => {
                let apt = self.book.cancel(index)?;
                Ok(format!("Cancelled {} on {} at {}.", apt.doctor_name, apt.date, apt.time))
            }
            "calendar" => {
                let apt = self.book.get(index)?.ok_or(BookingError::NotFound { index })?;
                Ok(format!("Add to calendar: {}", calendar_url(&apt)?))
            }
            _ => {
                let session = self.book.reschedule(index)?;
                let intro = format!(
                    "Rescheduling with {} ({}). Your current appointment stays booked until you /cancel it.",
                    session.doctor_name(),
                    session.specialty()
                );
                self.start_booking(session, &intro)
            }
        }
    }

    fn list_appointments(&self) -> Result<String, BookingError> {
        let appointments = self.book.list()?;
        if appointments.is_empty() {
            return Ok("No upcoming appointments.".to_string());
        }

        let mut out = String::new();
        for (i, apt) in appointments.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({}) {} at {} [{}] {}\n",
                i + 1,
                apt.doctor_name,
                apt.specialty,
                apt.date.format("%A, %-d %B %Y"),
                apt.time,
                time_until_label(apt.date, self.today),
                apt.location.as_deref().unwrap_or(LOCATION_PLACEHOLDER),
            ));
            for tip in preparation_instructions(&apt.specialty) {
                out.push_str(&format!("   - {tip}\n"));
            }
        }
        Ok(out.trim_end().to_string())
    }
}

/// 1-based list position.
fn parse_position(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|n| *n >= 1)
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// "March 2026 open days: 4, 5, 6, 9, ..."
fn month_overview(year: i32, month: u32, today: NaiveDate) -> Result<String, BookingError> {
    let days = day_availability(year, month, today)?;
    let label = days
        .first()
        .map(|d| d.date.format("%B %Y").to_string())
        .unwrap_or_default();
    let open: Vec<String> = days
        .iter()
        .filter(|d| d.availability == DayAvailability::Available)
        .map(|d| d.date.day().to_string())
        .collect();

    if open.is_empty() {
        Ok(format!("{label}: no open days."))
    } else {
        Ok(format!("{label} open days: {}", open.join(", ")))
    }
}

fn confirmation_text(apt: &Appointment) -> String {
    let mut out = format!(
        "Appointment confirmed with {} ({}) on {} at {}.\nLocation: {}\nPreparation:\n",
        apt.doctor_name,
        apt.specialty,
        apt.date.format("%A, %-d %B %Y"),
        apt.time,
        apt.location.as_deref().unwrap_or(LOCATION_PLACEHOLDER),
    );
    for tip in preparation_instructions(&apt.specialty) {
        out.push_str(&format!("   - {tip}\n"));
    }
    out.trim_end().to_string()
}
