//! Active and cancelled appointment lists on top of [`JsonStore`].

use std::path::Path;

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use super::prep::random_location;
use super::session::BookingSession;
use super::store::{JsonStore, ListStore, APPOINTMENTS_KEY, CANCELLED_KEY};
use super::BookingError;
use crate::models::{Appointment, AppointmentStatus, NewAppointment};

pub struct AppointmentBook<S = JsonStore> {
    store: S,
}

impl AppointmentBook<JsonStore> {
    pub fn open(root: &Path) -> Result<Self, BookingError> {
        Ok(Self::with_store(JsonStore::open(root)?))
    }
}

impl<S: ListStore> AppointmentBook<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active appointments in booking order. Indices are positions here.
    pub fn list(&self) -> Result<Vec<Appointment>, BookingError> {
        self.store.read_list(APPOINTMENTS_KEY)
    }

    pub fn cancelled(&self) -> Result<Vec<Appointment>, BookingError> {
        self.store.read_list(CANCELLED_KEY)
    }

    pub fn get(&self, index: usize) -> Result<Option<Appointment>, BookingError> {
        Ok(self.list()?.into_iter().nth(index))
    }

    /// Append a confirmed appointment at a random hospital location.
    pub fn book<R: Rng + ?Sized>(
        &self,
        new: NewAppointment,
        rng: &mut R,
    ) -> Result<Appointment, BookingError> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_name: new.doctor_name,
            specialty: new.specialty,
            date: new.date,
            time: new.time,
            location: Some(random_location(rng).to_string()),
            booked_at: Utc::now(),
            status: AppointmentStatus::Confirmed,
            cancelled_at: None,
        };

        let mut active = self.list()?;
        active.push(appointment.clone());
        self.store.write_list(APPOINTMENTS_KEY, &active)?;

        tracing::info!(
            id = %appointment.id,
            date = %appointment.date,
            active = active.len(),
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// Move the appointment at `index` to the cancelled list.
    ///
    /// The active list is shortened first. If recording the cancellation then
    /// fails, the active list is restored, so an appointment never ends up in
    /// both lists.
    pub fn cancel(&self, index: usize) -> Result<Appointment, BookingError> {
        let before = self.list()?;
        if index >= before.len() {
            return Err(BookingError::NotFound { index });
        }
        let mut cancelled = self.cancelled()?;

        let mut active = before.clone();
        let mut appointment = active.remove(index);
        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancelled_at = Some(Utc::now());
        cancelled.push(appointment.clone());

        self.store.write_list(APPOINTMENTS_KEY, &active)?;
        if let Err(e) = self.store.write_list(CANCELLED_KEY, &cancelled) {
            if let Err(restore) = self.store.write_list(APPOINTMENTS_KEY, &before) {
                tracing::error!(id = %appointment.id, error = %restore, "Failed to restore active appointments");
            }
            return Err(e);
        }

        tracing::info!(id = %appointment.id, index, "Appointment cancelled");
        Ok(appointment)
    }

    /// A fresh booking session for the same doctor as the appointment at
    /// `index`. The original stays booked until explicitly cancelled.
    pub fn reschedule(&self, index: usize) -> Result<BookingSession, BookingError> {
        let appointment = self.get(index)?.ok_or(BookingError::NotFound { index })?;
        Ok(BookingSession::new(
            &appointment.doctor_name,
            Some(&appointment.specialty),
        ))
    }

    /// Drop both lists.
    pub fn clear(&self) -> Result<(), BookingError> {
        self.store.remove(APPOINTMENTS_KEY)?;
        self.store.remove(CANCELLED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_appointment(doctor: &str, day: u32) -> NewAppointment {
        NewAppointment {
            doctor_name: doctor.into(),
            specialty: "Neurologist".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            time: "10:00 AM".into(),
        }
    }

    fn open_book() -> (tempfile::TempDir, AppointmentBook) {
        let dir = tempfile::tempdir().unwrap();
        let book = AppointmentBook::open(dir.path()).unwrap();
        (dir, book)
    }

    #[test]
    fn empty_book_lists_nothing() {
        let (_dir, book) = open_book();
        assert!(book.list().unwrap().is_empty());
        assert!(book.cancelled().unwrap().is_empty());
        assert!(book.get(0).unwrap().is_none());
    }

    #[test]
    fn booking_appends_confirmed_record() {
        let (_dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(9);
        let first = book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();
        let second = book.book(new_appointment("Dr. B", 6), &mut rng).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, AppointmentStatus::Confirmed);
        assert!(first.location.is_some());

        let listed = book.list().unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[test]
    fn bookings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let booked = AppointmentBook::open(dir.path())
            .unwrap()
            .book(new_appointment("Dr. A", 5), &mut rng)
            .unwrap();

        let reopened = AppointmentBook::open(dir.path()).unwrap();
        assert_eq!(reopened.get(0).unwrap(), Some(booked));
    }

    #[test]
    fn cancel_moves_record_and_stamps_it() {
        let (_dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();
        book.book(new_appointment("Dr. B", 6), &mut rng).unwrap();

        let cancelled = book.cancel(0).unwrap();
        assert_eq!(cancelled.doctor_name, "Dr. A");
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert!(cancelled.cancelled_at.is_some());

        let active = book.list().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].doctor_name, "Dr. B");
        assert_eq!(book.cancelled().unwrap(), vec![cancelled]);
    }

    #[test]
    fn cancel_out_of_range_changes_nothing() {
        let (_dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();

        assert!(matches!(book.cancel(1), Err(BookingError::NotFound { index: 1 })));
        assert_eq!(book.list().unwrap().len(), 1);
        assert!(book.cancelled().unwrap().is_empty());
    }

    /// Delegates to a real store but fails every write to one key.
    struct FailingWrites {
        inner: JsonStore,
        key: &'static str,
    }

    impl ListStore for FailingWrites {
        fn read_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, BookingError> {
            self.inner.read_list(key)
        }

        fn write_list<T: serde::Serialize>(&self, key: &str, items: &[T]) -> Result<(), BookingError> {
            if key == self.key {
                return Err(BookingError::Io(std::io::Error::other("disk full")));
            }
            self.inner.write_list(key, items)
        }

        fn remove(&self, key: &str) -> Result<(), BookingError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_cancellation_record_keeps_appointment_active() {
        let (dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        let booked = book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();

        let failing = AppointmentBook::with_store(FailingWrites {
            inner: JsonStore::open(dir.path()).unwrap(),
            key: CANCELLED_KEY,
        });
        assert!(matches!(failing.cancel(0), Err(BookingError::Io(_))));

        assert_eq!(book.list().unwrap(), vec![booked]);
        assert!(book.cancelled().unwrap().is_empty());

        // A retry once storage recovers records exactly one cancellation.
        book.cancel(0).unwrap();
        assert!(book.list().unwrap().is_empty());
        assert_eq!(book.cancelled().unwrap().len(), 1);
    }

    #[test]
    fn failed_active_write_changes_nothing() {
        let (dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();

        let failing = AppointmentBook::with_store(FailingWrites {
            inner: JsonStore::open(dir.path()).unwrap(),
            key: APPOINTMENTS_KEY,
        });
        assert!(failing.cancel(0).is_err());
        assert_eq!(book.list().unwrap().len(), 1);
        assert!(book.cancelled().unwrap().is_empty());
    }

    #[test]
    fn reschedule_prefills_doctor() {
        let (_dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();

        let session = book.reschedule(0).unwrap();
        assert_eq!(session.doctor_name(), "Dr. A");
        assert_eq!(session.specialty(), "Neurologist");
        assert!(session.selected_date().is_none());
        assert!(matches!(book.reschedule(4), Err(BookingError::NotFound { index: 4 })));
    }

    #[test]
    fn clear_drops_both_lists() {
        let (_dir, book) = open_book();
        let mut rng = StdRng::seed_from_u64(2);
        book.book(new_appointment("Dr. A", 5), &mut rng).unwrap();
        book.cancel(0).unwrap();
        book.clear().unwrap();
        assert!(book.list().unwrap().is_empty());
        assert!(book.cancelled().unwrap().is_empty());
    }
}
