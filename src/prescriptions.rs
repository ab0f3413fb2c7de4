//! Prescription form rules: dispensed quantity per item and patient age.

use chrono::{Datelike, NaiveDate};

use crate::models::{Prescription, PrescriptionFrequency, PrescriptionItem};

impl PrescriptionFrequency {
    /// Administrations per day. As-needed counts as zero.
    pub fn per_day(&self) -> u32 {
        match self {
            Self::OnceDaily => 1,
            Self::Bid => 2,
            Self::Tid => 3,
            Self::Qid => 4,
            Self::Prn => 0,
        }
    }
}

impl PrescriptionItem {
    pub fn frequency_value(&self) -> u32 {
        self.frequency.map(|f| f.per_day()).unwrap_or(0)
    }

    /// Units to dispense for the whole treatment.
    pub fn quantity(&self) -> u32 {
        self.duration.saturating_mul(self.frequency_value())
    }
}

/// Whole years between `dob` and `today`. A date of birth in the future
/// yields `None`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

impl Prescription {
    pub fn patient_age(&self, today: NaiveDate) -> Option<u32> {
        self.patient_dob.and_then(|dob| age_on(dob, today))
    }

    /// Sum of item quantities, saturating at `u32::MAX`.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .map(PrescriptionItem::quantity)
            .fold(0u32, u32::saturating_add)
    }
}
