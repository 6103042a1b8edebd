//! The built-in recommendation table.
//!
//! Authoring order inside each tier is significant: condition matching
//! returns the first entry that fits.

use super::types::{ConditionEntry, ConditionRecord, MedicineRecommendation as Med};

fn self_care(condition: &str, medicines: Vec<Med>, advice: &str) -> ConditionRecord {
    ConditionRecord {
        condition: condition.to_string(),
        entry: ConditionEntry::SelfCare {
            medicines,
            advice: advice.to_string(),
        },
    }
}

fn emergency(condition: &str, action: &str, advice: &str) -> ConditionRecord {
    ConditionRecord {
        condition: condition.to_string(),
        entry: ConditionEntry::Emergency {
            action: action.to_string(),
            advice: advice.to_string(),
        },
    }
}

fn paracetamol() -> Med {
    Med::new("Paracetamol", "500mg every 6 hours", "3g")
}

fn ibuprofen() -> Med {
    Med::new("Ibuprofen", "400mg every 8 hours", "1.2g")
}

fn topical_gel() -> Med {
    Med::new("Topical pain relief gel", "Apply 3-4 times daily", "As directed")
}

/// Common complaints manageable with over-the-counter medication.
pub(crate) fn low_tier() -> Vec<ConditionRecord> {
    vec![
        self_care(
            "headache",
            vec![paracetamol(), ibuprofen()],
            "Rest in a dark room, stay hydrated. If headache persists for more than 3 days, consult a doctor.",
        ),
        self_care(
            "fever",
            vec![paracetamol(), ibuprofen()],
            "Drink plenty of fluids, rest. Monitor temperature. If fever exceeds 102°F or lasts more than 3 days, see a doctor.",
        ),
        self_care(
            "cough",
            vec![
                Med::new("Dextromethorphan", "15mg every 4 hours", "120mg"),
                Med::new("Honey", "1-2 teaspoons as needed", "No limit"),
            ],
            "Stay hydrated, use humidifier. Avoid smoking. If cough persists for more than 2 weeks, consult doctor.",
        ),
        self_care(
            "cold",
            vec![
                paracetamol(),
                Med::new("Saline nasal spray", "As needed", "No limit"),
            ],
            "Rest, drink warm fluids, gargle with salt water. Symptoms should improve in 7-10 days.",
        ),
        self_care(
            "leg pain",
            vec![ibuprofen(), topical_gel()],
            "Rest the affected leg, apply ice for 15-20 minutes. Gentle stretching may help. If pain persists for more than 3 days, consult a doctor.",
        ),
        self_care(
            "muscle pain",
            vec![ibuprofen(), paracetamol()],
            "Rest, apply heat or cold therapy. Gentle massage may help. Stay hydrated and get adequate rest.",
        ),
    ]
}

/// Needs monitoring; may need a prescription.
pub(crate) fn medium_tier() -> Vec<ConditionRecord> {
    vec![
        self_care(
            "stomach pain",
            vec![
                Med::new("Antacid", "2 tablets after meals", "8 tablets"),
                Med::new("Omeprazole", "20mg once daily", "20mg"),
            ],
            "Avoid spicy foods, eat small meals. If pain is severe or persists for more than 2 days, see a doctor immediately.",
        ),
        self_care(
            "diarrhea",
            vec![
                Med::new("ORS", "1 packet in 200ml water", "6 packets"),
                Med::new("Loperamide", "2mg after each loose stool", "16mg"),
            ],
            "Stay hydrated, eat bland foods. If blood in stool or fever develops, seek immediate medical care.",
        ),
        self_care(
            "back pain",
            vec![ibuprofen(), topical_gel()],
            "Apply heat/cold, gentle stretching. If pain radiates to legs or numbness occurs, see doctor immediately.",
        ),
        self_care(
            "sore throat",
            vec![
                Med::new("Throat lozenges", "1 every 2 hours", "12 lozenges"),
                ibuprofen(),
            ],
            "Gargle with warm salt water, stay hydrated. If difficulty swallowing or high fever, consult doctor.",
        ),
    ]
}

/// Routes to emergency care.
pub(crate) fn severe_tier() -> Vec<ConditionRecord> {
    vec![
        emergency(
            "chest pain",
            "EMERGENCY - Call ambulance immediately",
            "This could be a heart attack. Do not drive yourself. Chew aspirin if not allergic while waiting for help.",
        ),
        emergency(
            "difficulty breathing",
            "EMERGENCY - Seek immediate medical care",
            "Go to emergency room immediately. This could indicate serious respiratory or cardiac issues.",
        ),
        emergency(
            "severe abdominal pain",
            "URGENT - Visit emergency room",
            "Severe abdominal pain may indicate appendicitis, gallbladder issues, or other serious conditions requiring immediate care.",
        ),
        emergency(
            "high fever",
            "URGENT - Consult doctor immediately",
            "Fever above 103°F (39.4°C) requires immediate medical attention, especially with other symptoms.",
        ),
        emergency(
            "severe headache",
            "URGENT - Seek immediate medical care",
            "Sudden severe headache could indicate stroke, meningitis, or other serious conditions.",
        ),
    ]
}
