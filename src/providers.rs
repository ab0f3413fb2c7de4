//! Healthcare provider form rules: contact normalisation, fee
//! suggestions and weekly schedule validation.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::models::{HealthcareProvider, IndicatorColor, ProviderStatus, ScheduleSlot};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Country code prefixed to local numbers.
pub const PHONE_COUNTRY_CODE: &str = "966";

/// Shortest digit string treated as a full phone number.
const PHONE_MIN_DIGITS: usize = 9;

impl ProviderStatus {
    pub fn indicator_color(&self) -> IndicatorColor {
        match self {
            Self::Active => IndicatorColor::Green,
            Self::Inactive => IndicatorColor::Red,
            Self::OnLeave => IndicatorColor::Orange,
        }
    }
}

/// Default consultation fee for a specialty, where one is known.
pub fn suggested_fee(specialty: &str) -> Option<f64> {
    match specialty {
        "Cardiology" => Some(200.0),
        "General Practice" => Some(100.0),
        _ => None,
    }
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::invalid("email", "please enter a valid email address"))
    }
}

/// Normalise a phone number to `+<country><digits>`. Numbers too short to
/// be complete are returned as entered.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < PHONE_MIN_DIGITS {
        return raw.to_string();
    }
    if digits.starts_with(PHONE_COUNTRY_CODE) {
        format!("+{digits}")
    } else {
        format!("+{PHONE_COUNTRY_CODE}{digits}")
    }
}

pub fn validate_time_range(slot: &ScheduleSlot) -> Result<(), CoreError> {
    if slot.from_time >= slot.to_time {
        return Err(CoreError::invalid(
            "to_time",
            format!("From Time must be before To Time for {}", slot.day),
        ));
    }
    Ok(())
}

impl HealthcareProvider {
    pub fn new(id: &str, provider_name: &str) -> Self {
        Self {
            id: id.into(),
            provider_name: provider_name.into(),
            specialty: None,
            status: ProviderStatus::Active,
            email: None,
            phone: None,
            consultation_fee: None,
            schedule: Vec::new(),
        }
    }

    /// Set the specialty, applying its suggested fee if there is one.
    pub fn set_specialty(&mut self, specialty: &str) {
        if let Some(fee) = suggested_fee(specialty) {
            self.consultation_fee = Some(fee);
        }
        self.specialty = Some(specialty.to_string());
    }

    /// Set the email; an invalid address clears the field.
    pub fn set_email(&mut self, email: &str) -> Result<(), CoreError> {
        match validate_email(email) {
            Ok(()) => {
                self.email = Some(email.to_string());
                Ok(())
            }
            Err(e) => {
                self.email = None;
                Err(e)
            }
        }
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.phone = Some(format_phone(phone));
    }

    /// Every slot has a valid range and no weekday appears twice.
    pub fn validate_schedule(&self) -> Result<(), CoreError> {
        let mut days = HashSet::new();
        for slot in &self.schedule {
            validate_time_range(slot)?;
            if !days.insert(slot.day) {
                return Err(CoreError::invalid(
                    "day",
                    format!("{} is already in the schedule", slot.day),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn slot(day: Weekday, from: u32, to: u32) -> ScheduleSlot {
        ScheduleSlot {
            day,
            from_time: NaiveTime::from_hms_opt(from, 0, 0).unwrap(),
            to_time: NaiveTime::from_hms_opt(to, 0, 0).unwrap(),
            is_available: true,
        }
    }

    #[test]
    fn status_colors() {
        assert_eq!(ProviderStatus::Active.indicator_color(), IndicatorColor::Green);
        assert_eq!(ProviderStatus::OnLeave.indicator_color(), IndicatorColor::Orange);
    }

    #[test]
    fn specialty_sets_known_fee_only() {
        let mut p = HealthcareProvider::new("PROV-0001", "Dr. Salma");
        p.set_specialty("Cardiology");
        assert_eq!(p.consultation_fee, Some(200.0));
        p.set_specialty("Dermatology");
        assert_eq!(p.consultation_fee, Some(200.0));
        assert_eq!(p.specialty.as_deref(), Some("Dermatology"));
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("doc@clinic.sa").is_ok());
        assert!(validate_email("doc@clinic").is_err());
        assert!(validate_email("doc clinic@x.sa").is_err());
    }

    #[test]
    fn invalid_email_clears_field() {
        let mut p = HealthcareProvider::new("PROV-0001", "Dr. Salma");
        p.set_email("doc@clinic.sa").unwrap();
        assert!(p.set_email("nope").is_err());
        assert!(p.email.is_none());
    }

    #[test]
    fn phone_formatting() {
        assert_eq!(format_phone("050 123 4567"), "+9660501234567");
        assert_eq!(format_phone("+966 50 123 4567"), "+966501234567");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn schedule_rejects_inverted_range() {
        let mut p = HealthcareProvider::new("PROV-0001", "Dr. Salma");
        p.schedule = vec![slot(Weekday::Mon, 17, 9)];
        assert!(p.validate_schedule().is_err());
    }

    #[test]
    fn schedule_rejects_duplicate_day() {
        let mut p = HealthcareProvider::new("PROV-0001", "Dr. Salma");
        p.schedule = vec![slot(Weekday::Mon, 9, 12), slot(Weekday::Mon, 14, 17)];
        let err = p.validate_schedule().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { field, .. } if field == "day"));

        p.schedule = vec![slot(Weekday::Mon, 9, 12), slot(Weekday::Tue, 9, 12)];
        assert!(p.validate_schedule().is_ok());
    }
}
