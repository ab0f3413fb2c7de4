use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::enums::ProviderStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareProvider {
    pub id: String,
    pub provider_name: String,
    pub specialty: Option<String>,
    pub status: ProviderStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub consultation_fee: Option<f64>,
    pub schedule: Vec<ScheduleSlot>,
}

/// Weekly availability row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub from_time: NaiveTime,
    pub to_time: NaiveTime,
    pub is_available: bool,
}
