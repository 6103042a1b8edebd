use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

/// Specialty recorded when the booking flow did not name one.
pub const DEFAULT_SPECIALTY: &str = "General Consultation";

/// A booked consultation as persisted in the appointment lists.
/// Field names are camelCase on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    /// 12-hour slot label, e.g. "9:30 AM".
    pub time: String,
    pub location: Option<String>,
    pub booked_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A fully selected booking, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Appointment {
        Appointment {
            id: Uuid::nil(),
            doctor_name: "Dr. Priya Sharma".into(),
            specialty: "Cardiologist".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            time: "10:30 AM".into(),
            location: Some("AIIMS, New Delhi".into()),
            booked_at: DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            status: AppointmentStatus::Confirmed,
            cancelled_at: None,
        }
    }

    #[test]
    fn serializes_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["doctorName"], "Dr. Priya Sharma");
        assert_eq!(json["date"], "2026-03-09");
        assert_eq!(json["status"], "confirmed");
        assert!(json.get("bookedAt").is_some());
        assert!(json.get("cancelledAt").is_none());
    }

    #[test]
    fn reads_record_without_cancellation_stamp() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "doctorName": "Dr. Priya Sharma",
            "specialty": "Cardiologist",
            "date": "2026-03-09",
            "time": "10:30 AM",
            "location": "AIIMS, New Delhi",
            "bookedAt": "2026-03-01T08:00:00Z",
            "status": "confirmed"
        }"#;
        let parsed: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, sample());
    }
}
