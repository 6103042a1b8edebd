//! Per-interaction booking state: doctor, chosen date and chosen slot.

use chrono::NaiveDate;
use rand::Rng;

use super::slots::{is_bookable, parse_slot, sample_time_slots};
use super::BookingError;
use crate::models::{NewAppointment, DEFAULT_SPECIALTY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSession {
    doctor_name: String,
    specialty: String,
    selected_date: Option<NaiveDate>,
    offered_slots: Vec<&'static str>,
    selected_time: Option<&'static str>,
}

impl BookingSession {
    /// A blank specialty falls back to [`DEFAULT_SPECIALTY`].
    pub fn new(doctor_name: &str, specialty: Option<&str>) -> Self {
        let specialty = specialty
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SPECIALTY);
        Self {
            doctor_name: doctor_name.trim().to_string(),
            specialty: specialty.to_string(),
            selected_date: None,
            offered_slots: Vec::new(),
            selected_time: None,
        }
    }

    /// Build from a "Doctor Name - Specialty" header.
    pub fn from_label(label: &str) -> Self {
        match label.split_once(" - ") {
            Some((doctor, specialty)) => Self::new(doctor, Some(specialty)),
            None => Self::new(label, None),
        }
    }

    pub fn doctor_name(&self) -> &str {
        &self.doctor_name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&'static str> {
        self.selected_time
    }

    pub fn offered_slots(&self) -> &[&'static str] {
        &self.offered_slots
    }

    /// Pick a day. Offers a fresh set of slots and clears any chosen time.
    pub fn select_date<R: Rng + ?Sized>(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<&[&'static str], BookingError> {
        if !is_bookable(date, today) {
            return Err(BookingError::UnavailableDate(date));
        }
        self.selected_date = Some(date);
        self.selected_time = None;
        self.offered_slots = sample_time_slots(rng);
        Ok(&self.offered_slots)
    }

    /// Pick one of the slots offered for the selected day.
    pub fn select_time(&mut self, time: &str) -> Result<(), BookingError> {
        if self.selected_date.is_none() {
            return Err(BookingError::IncompleteSelection);
        }
        let wanted = parse_slot(time)?;
        let slot = self
            .offered_slots
            .iter()
            .copied()
            .find(|s| parse_slot(s).is_ok_and(|t| t == wanted))
            .ok_or_else(|| BookingError::InvalidTime(time.to_string()))?;
        self.selected_time = Some(slot);
        Ok(())
    }

    /// Drop date and time selections.
    pub fn reset(&mut self) {
        self.selected_date = None;
        self.offered_slots.clear();
        self.selected_time = None;
    }

    pub fn is_ready(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some()
    }

    /// Confirm-button text for the current selection.
    pub fn confirm_label(&self) -> String {
        match (self.selected_date, self.selected_time) {
            (Some(date), Some(time)) => format!("Confirm: {} at {time}", date.format("%b %-d")),
            (Some(_), None) => "Select a time slot".to_string(),
            _ => "Confirm Appointment".to_string(),
        }
    }

    /// Turn a complete selection into a record ready to book.
    pub fn confirm(&self) -> Result<NewAppointment, BookingError> {
        let (Some(date), Some(time)) = (self.selected_date, self.selected_time) else {
            return Err(BookingError::IncompleteSelection);
        };
        Ok(NewAppointment {
            doctor_name: self.doctor_name.clone(),
            specialty: self.specialty.clone(),
            date,
            time: time.to_string(),
        })
    }
}
