use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::MealTiming;

/// A patient's standing medication with its dose times and remaining stock.
///
/// Daily consumption and days-until-depletion are not fields: they are
/// derived from `times` and `current_stock` on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationSchedule {
    pub id: Uuid,
    pub patient: String,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: Option<String>,
    pub times: Vec<DoseTime>,
    pub current_stock: u32,
    pub stock_unit: String,
    pub is_active: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One row of the dose-time table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseTime {
    pub time: NaiveTime,
    pub meal_timing: Option<MealTiming>,
    pub notes: Option<String>,
}

impl DoseTime {
    pub fn at(time: NaiveTime) -> Self {
        Self {
            time,
            meal_timing: None,
            notes: None,
        }
    }
}
