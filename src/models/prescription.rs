use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::PrescriptionFrequency;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient: String,
    pub patient_dob: Option<NaiveDate>,
    pub items: Vec<PrescriptionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub medication_name: String,
    pub frequency: Option<PrescriptionFrequency>,
    /// Treatment length in days.
    pub duration: u32,
}
