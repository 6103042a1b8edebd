//! Display helpers for upcoming appointments: preparation tips, initials,
//! relative day labels, hospital locations and calendar links.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Url;

use super::slots::parse_slot;
use super::BookingError;
use crate::models::Appointment;

pub const CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";
pub const CONSULTATION_MINUTES: i64 = 30;
pub const LOCATION_PLACEHOLDER: &str = "Location TBD";

pub const LOCATIONS: &[&str] = &[
    "Apollo Hospital, Mumbai",
    "Fortis Healthcare, Delhi",
    "Max Hospital, Gurgaon",
    "Manipal Hospital, Bangalore",
    "AIIMS, New Delhi",
    "Medanta, Gurgaon",
    "Kokilaben Hospital, Mumbai",
    "CMC Vellore, Tamil Nadu",
];

const DEFAULT_PREPARATION: [&str; 3] = [
    "Bring valid ID and insurance information",
    "Arrive 15 minutes early for paperwork",
    "Prepare questions for the doctor",
];

/// Three preparation tips for a specialty, with a general fallback.
pub fn preparation_instructions(specialty: &str) -> [&'static str; 3] {
    match specialty {
        "Cardiologist" => [
            "Avoid caffeine 24 hours before your appointment",
            "Bring list of current medications",
            "Wear comfortable, loose-fitting clothing",
        ],
        "General Physician" => [
            "Fast for 8-12 hours if blood work is expected",
            "Bring previous medical records if available",
            "List any symptoms or concerns to discuss",
        ],
        "Dermatologist" => [
            "Remove nail polish if nails are being examined",
            "Avoid applying makeup or lotions on affected areas",
            "Take photos of skin changes to show progression",
        ],
        "Gastroenterologist" => [
            "Follow any fasting instructions provided",
            "Bring list of foods that cause discomfort",
            "Note frequency and timing of symptoms",
        ],
        "Neurologist" => [
            "Keep a headache/symptom diary if applicable",
            "Bring list of all medications including OTC",
            "Get adequate sleep the night before",
        ],
        _ => DEFAULT_PREPARATION,
    }
}

/// Up to two upper-case initials: "Dr. Priya Sharma" → "DP".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// "Today", "Tomorrow" or "In N days". Past dates report "N days ago".
pub fn time_until_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n if n < 0 => format!("{} days ago", -n),
        n => format!("In {n} days"),
    }
}

pub fn random_location<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    LOCATIONS.choose(rng).copied().unwrap_or(LOCATION_PLACEHOLDER)
}

/// Consultation start as a naive local date-time.
pub fn appointment_start(appointment: &Appointment) -> Result<NaiveDateTime, BookingError> {
    Ok(appointment.date.and_time(parse_slot(&appointment.time)?))
}

/// Pre-filled calendar event link for a 30-minute consultation.
pub fn calendar_url(appointment: &Appointment) -> Result<Url, BookingError> {
    let start = appointment_start(appointment)?;
    let end = start + Duration::minutes(CONSULTATION_MINUTES);
    let stamp = |t: NaiveDateTime| t.format("%Y%m%dT%H%M%S").to_string();

    let dates = format!("{}/{}", stamp(start), stamp(end));
    let text = format!("Doctor Appointment - {}", appointment.doctor_name);
    let details = format!(
        "Appointment with {} ({})",
        appointment.doctor_name, appointment.specialty
    );
    let location = appointment.location.as_deref().unwrap_or_default();

    Url::parse_with_params(
        CALENDAR_BASE_URL,
        [
            ("action", "TEMPLATE"),
            ("text", text.as_str()),
            ("dates", dates.as_str()),
            ("details", details.as_str()),
            ("location", location),
        ],
    )
    .map_err(|e| BookingError::CalendarLink(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(time: &str, location: Option<&str>) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            doctor_name: "Dr. Priya Sharma".into(),
            specialty: "Cardiologist".into(),
            date: date(2026, 3, 9),
            time: time.into(),
            location: location.map(String::from),
            booked_at: Utc::now(),
            status: AppointmentStatus::Confirmed,
            cancelled_at: None,
        }
    }

    #[test]
    fn known_specialty_gets_specific_tips() {
        let tips = preparation_instructions("Cardiologist");
        assert_eq!(tips[0], "Avoid caffeine 24 hours before your appointment");
    }

    #[test]
    fn unknown_specialty_gets_default_tips() {
        assert_eq!(preparation_instructions("Oncologist"), DEFAULT_PREPARATION);
        assert_eq!(preparation_instructions("General Consultation"), DEFAULT_PREPARATION);
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Dr. Priya Sharma"), "DP");
        assert_eq!(initials("anil"), "A");
        assert_eq!(initials("  "), "");
    }

    #[test]
    fn relative_day_labels() {
        let today = date(2026, 3, 9);
        assert_eq!(time_until_label(today, today), "Today");
        assert_eq!(time_until_label(date(2026, 3, 10), today), "Tomorrow");
        assert_eq!(time_until_label(date(2026, 3, 14), today), "In 5 days");
        assert_eq!(time_until_label(date(2026, 3, 7), today), "2 days ago");
    }

    #[test]
    fn random_location_comes_from_list() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(LOCATIONS.contains(&random_location(&mut rng)));
        }
    }

    #[test]
    fn calendar_url_carries_event_fields() {
        let url = calendar_url(&appointment("1:30 PM", Some("AIIMS, New Delhi"))).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["action"], "TEMPLATE");
        assert_eq!(params["text"], "Doctor Appointment - Dr. Priya Sharma");
        assert_eq!(params["dates"], "20260309T133000/20260309T140000");
        assert_eq!(params["details"], "Appointment with Dr. Priya Sharma (Cardiologist)");
        assert_eq!(params["location"], "AIIMS, New Delhi");
        assert!(url.as_str().starts_with(CALENDAR_BASE_URL));
    }

    #[test]
    fn calendar_url_without_location_sends_empty_value() {
        let url = calendar_url(&appointment("9:00 AM", None)).unwrap();
        let location = url.query_pairs().find(|(k, _)| k == "location").map(|(_, v)| v.into_owned());
        assert_eq!(location.as_deref(), Some(""));
    }

    #[test]
    fn calendar_url_rejects_bad_time() {
        assert!(matches!(
            calendar_url(&appointment("noon", None)),
            Err(BookingError::InvalidTime(_))
        ));
    }
}
