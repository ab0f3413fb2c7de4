//! Medication stock depletion: derived consumption, severity tiers,
//! stock mutations and refill alerts for medication schedules.
//!
//! Everything here is a pure function of a `MedicationSchedule` value.
//! Persisting the new stock and delivering alerts belong to the caller.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::CoreError;
use crate::models::{DoseTime, Indicator, IndicatorColor, MealTiming, MedicationSchedule};

/// Stock units consumed per administration, whatever strength the dosage
/// declares. "500mg" twice a day is two tablets, not 1000.
pub const UNITS_PER_ADMINISTRATION: u32 = 1;

static DOSAGE_STRENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

// ═══════════════════════════════════════════
// Depletion estimate
// ═══════════════════════════════════════════

/// Result of a depletion estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Depletion {
    pub daily_consumption: u64,
    pub days_until_depletion: u64,
}

/// Daily consumption and whole days of stock left.
///
/// Zero doses per day yields zero days ("unknown"), not infinity.
/// Negative counts are rejected rather than clamped; every non-negative
/// input has an answer.
pub fn compute_depletion(times_per_day: i64, current_stock: i64) -> Result<Depletion, CoreError> {
    let times_per_day = u64::try_from(times_per_day)
        .map_err(|_| CoreError::invalid("times_per_day", "must not be negative"))?;
    let current_stock = u64::try_from(current_stock)
        .map_err(|_| CoreError::invalid("current_stock", "must not be negative"))?;
    Ok(depletion_of(times_per_day, current_stock))
}

fn depletion_of(times_per_day: u64, current_stock: u64) -> Depletion {
    let daily_consumption = times_per_day.saturating_mul(u64::from(UNITS_PER_ADMINISTRATION));
    let days_until_depletion = if daily_consumption == 0 {
        0
    } else {
        current_stock / daily_consumption
    };
    Depletion {
        daily_consumption,
        days_until_depletion,
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// ═══════════════════════════════════════════
// Severity tier
// ═══════════════════════════════════════════

/// Display urgency derived from days until depletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StockTier {
    OutOfStock,
    Critical,
    Low,
    Ok,
    Good,
}

impl StockTier {
    /// First matching band wins: <=0, 1-2, 3-5, 6-10, >10.
    pub fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::OutOfStock,
            1..=2 => Self::Critical,
            3..=5 => Self::Low,
            6..=10 => Self::Ok,
            _ => Self::Good,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfStock => "out_of_stock",
            Self::Critical => "critical",
            Self::Low => "low",
            Self::Ok => "ok",
            Self::Good => "good",
        }
    }

    /// Out of stock counts as critical.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::OutOfStock | Self::Critical)
    }

    /// Tiers that should start a refill workflow.
    pub fn needs_refill(&self) -> bool {
        matches!(self, Self::OutOfStock | Self::Critical | Self::Low)
    }

    pub fn color(&self) -> IndicatorColor {
        match self {
            Self::OutOfStock | Self::Critical => IndicatorColor::Red,
            Self::Low => IndicatorColor::Orange,
            Self::Ok => IndicatorColor::Blue,
            Self::Good => IndicatorColor::Green,
        }
    }

    /// Headline text for the given remaining days.
    pub fn headline(&self, days: u32) -> String {
        match self {
            Self::OutOfStock => "OUT OF STOCK! Please refill immediately.".to_string(),
            Self::Critical => format!("CRITICAL: Only {days} days of medication left!"),
            Self::Low => format!("Low Stock: {days} days remaining"),
            Self::Ok => format!("Stock OK: {days} days remaining"),
            Self::Good => format!("Stock Good: {days} days remaining"),
        }
    }
}

// ═══════════════════════════════════════════
// Input parsing
// ═══════════════════════════════════════════

/// Leading numeric strength of a dosage descriptor ("500mg" -> 500).
///
/// Reported for display only; consumption ignores it.
pub fn parse_dosage_strength(dosage: &str) -> Option<f64> {
    DOSAGE_STRENGTH
        .find(dosage)
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a dose time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_dose_time(text: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| CoreError::invalid("time", format!("malformed time value '{trimmed}'")))
}

// ═══════════════════════════════════════════
// Schedule operations
// ═══════════════════════════════════════════

/// Stock state after a refill or a recorded dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockChange {
    pub current_stock: u32,
    pub days_until_depletion: u32,
}

/// Figures shown in the refill dialog before confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillPreview {
    pub new_stock: u32,
    pub new_days: u32,
}

/// Notification payload for a schedule running low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub schedule_id: Uuid,
    pub patient: String,
    pub subject: String,
    pub medication_name: String,
    pub current_stock: u32,
    pub stock_unit: String,
    pub days_until_depletion: u32,
}

/// A dose falling inside the "due now" window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDose {
    pub schedule_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub time: NaiveTime,
    pub meal_timing: Option<MealTiming>,
    pub notes: Option<String>,
    pub current_stock: u32,
}

impl MedicationSchedule {
    pub fn new(patient: &str, medication_name: &str, dosage: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient: patient.into(),
            medication_name: medication_name.into(),
            dosage: dosage.into(),
            frequency: None,
            times: Vec::new(),
            current_stock: 0,
            stock_unit: "Tablet".into(),
            is_active: true,
            start_date: None,
            end_date: None,
        }
    }

    fn times_per_day(&self) -> u64 {
        u64::try_from(self.times.len()).unwrap_or(u64::MAX)
    }

    pub fn depletion(&self) -> Depletion {
        depletion_of(self.times_per_day(), u64::from(self.current_stock))
    }

    pub fn daily_consumption(&self) -> u32 {
        saturate(self.depletion().daily_consumption)
    }

    /// Whole days left. Stock is a `u32`, so the value always fits.
    pub fn days_until_depletion(&self) -> u32 {
        saturate(self.depletion().days_until_depletion)
    }

    pub fn stock_tier(&self) -> StockTier {
        StockTier::from_days(i64::from(self.days_until_depletion()))
    }

    fn stock_change(&self) -> StockChange {
        StockChange {
            current_stock: self.current_stock,
            days_until_depletion: self.days_until_depletion(),
        }
    }

    pub fn set_current_stock(&mut self, stock: i64) -> Result<(), CoreError> {
        if stock < 0 {
            tracing::warn!(schedule = %self.id, stock, "Rejected negative stock");
            return Err(CoreError::invalid("current_stock", "must not be negative"));
        }
        self.current_stock = u32::try_from(stock)
            .map_err(|_| CoreError::invalid("current_stock", "out of range"))?;
        Ok(())
    }

    pub fn set_times(&mut self, times: Vec<DoseTime>) {
        self.times = times;
    }

    /// Replace the dose times from their textual form. Nothing changes if
    /// any value is malformed.
    pub fn set_times_from_text(&mut self, times: &[&str]) -> Result<(), CoreError> {
        let parsed = times
            .iter()
            .map(|t| parse_dose_time(t).map(DoseTime::at))
            .collect::<Result<Vec<_>, _>>()?;
        self.times = parsed;
        Ok(())
    }

    pub fn set_dosage(&mut self, dosage: &str) {
        if let Some(strength) = parse_dosage_strength(dosage) {
            tracing::debug!(
                schedule = %self.id,
                strength,
                "Dosage strength noted; consumption counts administrations"
            );
        }
        self.dosage = dosage.into();
    }

    /// Add `quantity` units of stock.
    pub fn refill(&mut self, quantity: i64) -> Result<StockChange, CoreError> {
        if quantity <= 0 {
            return Err(CoreError::invalid("quantity", "must be positive"));
        }
        let added = u32::try_from(quantity)
            .ok()
            .and_then(|q| self.current_stock.checked_add(q))
            .ok_or_else(|| CoreError::invalid("quantity", "out of range"))?;
        self.current_stock = added;
        tracing::info!(schedule = %self.id, stock = added, "Stock refilled");
        Ok(self.stock_change())
    }

    /// Record one dose taken.
    pub fn consume_dose(&mut self) -> Result<StockChange, CoreError> {
        if self.current_stock == 0 {
            return Err(CoreError::OutOfStock);
        }
        self.current_stock -= 1;
        tracing::debug!(schedule = %self.id, stock = self.current_stock, "Dose recorded");
        Ok(self.stock_change())
    }

    pub fn deactivate(&mut self, today: NaiveDate) {
        self.is_active = false;
        self.end_date = Some(today);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Stock figures the refill dialog shows for an added quantity.
    pub fn refill_preview(&self, add_quantity: i64) -> Result<RefillPreview, CoreError> {
        if add_quantity < 0 {
            return Err(CoreError::invalid("add_quantity", "must not be negative"));
        }
        let new_stock = u32::try_from(add_quantity)
            .ok()
            .and_then(|q| self.current_stock.checked_add(q))
            .ok_or_else(|| CoreError::invalid("add_quantity", "out of range"))?;
        let new_days = saturate(
            depletion_of(self.times_per_day(), u64::from(new_stock)).days_until_depletion,
        );
        Ok(RefillPreview { new_stock, new_days })
    }

    /// Save-time checks on the whole schedule.
    pub fn validate_for_save(&self, today: NaiveDate, config: &AppConfig) -> Result<(), CoreError> {
        if self.times.is_empty() {
            return Err(CoreError::invalid("times", "at least one medication time is required"));
        }

        let mut seen = HashSet::new();
        if !self.times.iter().all(|t| seen.insert(t.time)) {
            return Err(CoreError::invalid("times", "duplicate medication times"));
        }

        if self.current_stock > config.stock_sanity_limit {
            return Err(CoreError::invalid(
                "current_stock",
                format!(
                    "{} seems unrealistic (limit {})",
                    self.current_stock, config.stock_sanity_limit
                ),
            ));
        }

        if let Some(start) = self.start_date {
            let latest = today + Duration::days(i64::from(config.max_start_lead_days));
            if start > latest {
                return Err(CoreError::invalid(
                    "start_date",
                    format!("cannot be more than {} days in the future", config.max_start_lead_days),
                ));
            }
            if let Some(end) = self.end_date {
                if end < start {
                    return Err(CoreError::invalid("end_date", "cannot be before start date"));
                }
            }
        }

        Ok(())
    }

    /// Headline alert for the form. Inactive schedules are exempt from
    /// depletion alerting.
    pub fn status_headline(&self) -> Indicator {
        if !self.is_active {
            return Indicator::new("This medication is inactive", IndicatorColor::Orange);
        }
        let tier = self.stock_tier();
        Indicator::new(tier.headline(self.days_until_depletion()), tier.color())
    }

    pub fn needs_refill(&self) -> bool {
        self.is_active && self.stock_tier().needs_refill()
    }

    pub fn offers_refill_action(&self, config: &AppConfig) -> bool {
        self.is_active && self.days_until_depletion() <= config.refill_action_threshold_days
    }

    pub fn offers_record_dose(&self) -> bool {
        self.is_active && self.current_stock > 0
    }

    /// Alert payload when an active schedule is at or under the threshold.
    pub fn low_stock_alert(&self, config: &AppConfig) -> Option<LowStockAlert> {
        let days = self.days_until_depletion();
        if !self.is_active || days > config.low_stock_threshold_days {
            return None;
        }
        Some(LowStockAlert {
            schedule_id: self.id,
            patient: self.patient.clone(),
            subject: format!("Low Stock Alert: {}", self.medication_name),
            medication_name: self.medication_name.clone(),
            current_stock: self.current_stock,
            stock_unit: self.stock_unit.clone(),
            days_until_depletion: days,
        })
    }
}

// ═══════════════════════════════════════════
// Collection queries
// ═══════════════════════════════════════════

/// Active schedules with at most `threshold` days left, most urgent first.
pub fn low_stock(schedules: &[MedicationSchedule], threshold: u32) -> Vec<&MedicationSchedule> {
    let mut low: Vec<&MedicationSchedule> = schedules
        .iter()
        .filter(|s| s.is_active && s.days_until_depletion() <= threshold)
        .collect();
    low.sort_by_key(|s| s.days_until_depletion());
    low
}

/// Doses of active schedules within `window_minutes` either side of `now`,
/// on `now`'s calendar day.
pub fn due_within(
    schedules: &[MedicationSchedule],
    now: NaiveDateTime,
    window_minutes: u32,
) -> Vec<DueDose> {
    let window = Duration::minutes(i64::from(window_minutes));
    let (start, end) = (now - window, now + window);

    schedules
        .iter()
        .filter(|s| s.is_active)
        .flat_map(|s| {
            s.times.iter().filter_map(move |t| {
                let at = now.date().and_time(t.time);
                (start <= at && at <= end).then(|| DueDose {
                    schedule_id: s.id,
                    medication_name: s.medication_name.clone(),
                    dosage: s.dosage.clone(),
                    time: t.time,
                    meal_timing: t.meal_timing,
                    notes: t.notes.clone(),
                    current_stock: s.current_stock,
                })
            })
        })
        .collect()
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Helper: active schedule with the given dose times and stock.
    fn schedule(times: &[&str], stock: u32) -> MedicationSchedule {
        let mut s = MedicationSchedule::new("PAT-0001", "Metformin", "500mg");
        s.set_times_from_text(times).unwrap();
        s.current_stock = stock;
        s
    }

    #[test]
    fn depletion_reference_values() {
        assert_eq!(
            compute_depletion(2, 10).unwrap(),
            Depletion { daily_consumption: 2, days_until_depletion: 5 }
        );
        assert_eq!(
            compute_depletion(3, 10).unwrap(),
            Depletion { daily_consumption: 3, days_until_depletion: 3 }
        );
        assert_eq!(
            compute_depletion(0, 10).unwrap(),
            Depletion { daily_consumption: 0, days_until_depletion: 0 }
        );
    }

    #[test]
    fn depletion_zero_times_is_zero_days_for_any_stock() {
        for stock in [0, 1, 999, 1_000_000] {
            assert_eq!(compute_depletion(0, stock).unwrap().days_until_depletion, 0);
        }
    }

    #[test]
    fn depletion_rejects_negative_inputs() {
        assert!(matches!(
            compute_depletion(-1, 10),
            Err(CoreError::InvalidInput { field, .. }) if field == "times_per_day"
        ));
        assert!(matches!(
            compute_depletion(2, -5),
            Err(CoreError::InvalidInput { field, .. }) if field == "current_stock"
        ));
    }

    #[test]
    fn depletion_answers_every_non_negative_input() {
        assert_eq!(
            compute_depletion(1, i64::MAX).unwrap(),
            Depletion { daily_consumption: 1, days_until_depletion: i64::MAX as u64 }
        );
        assert_eq!(compute_depletion(1, 5_000_000_000).unwrap().days_until_depletion, 5_000_000_000);
        assert_eq!(compute_depletion(i64::MAX, 10).unwrap().days_until_depletion, 0);
    }

    #[test]
    fn schedule_depletion_matches_free_function() {
        let s = schedule(&["08:00", "14:00", "20:00"], u32::MAX);
        let expected = compute_depletion(3, i64::from(u32::MAX)).unwrap();
        assert_eq!(s.depletion(), expected);
        assert_eq!(u64::from(s.days_until_depletion()), expected.days_until_depletion);
    }

    #[test]
    fn tier_bands() {
        assert_eq!(StockTier::from_days(-3), StockTier::OutOfStock);
        assert_eq!(StockTier::from_days(0), StockTier::OutOfStock);
        assert_eq!(StockTier::from_days(2), StockTier::Critical);
        assert_eq!(StockTier::from_days(5), StockTier::Low);
        assert_eq!(StockTier::from_days(10), StockTier::Ok);
        assert_eq!(StockTier::from_days(11), StockTier::Good);
    }

    #[test]
    fn tier_is_monotonic_in_days() {
        let tiers: Vec<StockTier> = (0..30).map(StockTier::from_days).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn out_of_stock_is_critical_and_needs_refill() {
        assert!(StockTier::OutOfStock.is_critical());
        assert!(StockTier::Low.needs_refill());
        assert!(!StockTier::Ok.needs_refill());
    }

    #[test]
    fn derived_values_follow_inputs() {
        let mut s = schedule(&["08:00", "20:00"], 10);
        assert_eq!(s.daily_consumption(), 2);
        assert_eq!(s.days_until_depletion(), 5);

        s.set_times_from_text(&["08:00", "14:00", "20:00"]).unwrap();
        assert_eq!(s.days_until_depletion(), 3);

        s.set_current_stock(31).unwrap();
        assert_eq!(s.days_until_depletion(), 10);

        s.set_times(Vec::new());
        assert_eq!(s.daily_consumption(), 0);
        assert_eq!(s.days_until_depletion(), 0);
    }

    #[test]
    fn dosage_strength_does_not_change_consumption() {
        let mut s = schedule(&["08:00", "20:00"], 10);
        s.set_dosage("1000mg");
        assert_eq!(parse_dosage_strength(&s.dosage), Some(1000.0));
        assert_eq!(s.daily_consumption(), 2);
    }

    #[test]
    fn dosage_strength_parsing() {
        assert_eq!(parse_dosage_strength("2.5 mg"), Some(2.5));
        assert_eq!(parse_dosage_strength("one tablet"), None);
    }

    #[test]
    fn negative_stock_rejected_and_unchanged() {
        let mut s = schedule(&["08:00"], 4);
        assert!(s.set_current_stock(-1).is_err());
        assert_eq!(s.current_stock, 4);
    }

    #[test]
    fn malformed_time_rejected_without_partial_update() {
        let mut s = schedule(&["08:00"], 4);
        let err = s.set_times_from_text(&["09:00", "25:61"]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
        assert_eq!(s.times.len(), 1);
    }

    #[test]
    fn parse_dose_time_accepts_both_forms() {
        assert_eq!(parse_dose_time("08:30").unwrap(), time(8, 30));
        assert_eq!(parse_dose_time(" 21:05:00 ").unwrap(), time(21, 5));
        assert!(parse_dose_time("8am").is_err());
    }

    #[test]
    fn refill_adds_stock() {
        let mut s = schedule(&["08:00", "20:00"], 4);
        let change = s.refill(30).unwrap();
        assert_eq!(change, StockChange { current_stock: 34, days_until_depletion: 17 });
        assert!(s.refill(0).is_err());
        assert!(s.refill(-5).is_err());
    }

    #[test]
    fn consume_decrements_until_empty() {
        let mut s = schedule(&["08:00"], 1);
        assert_eq!(s.consume_dose().unwrap().current_stock, 0);
        assert!(matches!(s.consume_dose(), Err(CoreError::OutOfStock)));
        assert_eq!(s.current_stock, 0);
    }

    #[test]
    fn deactivate_sets_end_date_and_activate_restores() {
        let mut s = schedule(&["08:00"], 1);
        s.deactivate(date(2025, 3, 1));
        assert!(!s.is_active);
        assert_eq!(s.end_date, Some(date(2025, 3, 1)));
        s.activate();
        assert!(s.is_active);
    }

    #[test]
    fn refill_preview_uses_current_times() {
        let s = schedule(&["08:00", "20:00"], 4);
        assert_eq!(
            s.refill_preview(30).unwrap(),
            RefillPreview { new_stock: 34, new_days: 17 }
        );
        assert!(s.refill_preview(-1).is_err());
    }

    #[test]
    fn validate_requires_times() {
        let s = schedule(&[], 10);
        let err = s.validate_for_save(date(2025, 1, 1), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { field, .. } if field == "times"));
    }

    #[test]
    fn validate_rejects_duplicate_times() {
        let s = schedule(&["08:00", "08:00:00"], 10);
        assert!(s.validate_for_save(date(2025, 1, 1), &AppConfig::default()).is_err());
    }

    #[test]
    fn validate_rejects_unrealistic_stock() {
        let s = schedule(&["08:00"], 1001);
        let err = s.validate_for_save(date(2025, 1, 1), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { field, .. } if field == "current_stock"));
    }

    #[test]
    fn validate_checks_dates() {
        let today = date(2025, 1, 1);
        let config = AppConfig::default();

        let mut s = schedule(&["08:00"], 10);
        s.start_date = Some(date(2026, 6, 1));
        assert!(s.validate_for_save(today, &config).is_err());

        s.start_date = Some(date(2025, 2, 1));
        s.end_date = Some(date(2025, 1, 15));
        assert!(s.validate_for_save(today, &config).is_err());

        s.end_date = Some(date(2025, 3, 1));
        assert!(s.validate_for_save(today, &config).is_ok());
    }

    #[test]
    fn headline_per_tier() {
        let s = schedule(&["08:00"], 0);
        assert_eq!(
            s.status_headline(),
            Indicator::new("OUT OF STOCK! Please refill immediately.", IndicatorColor::Red)
        );
        let s = schedule(&["08:00"], 2);
        assert_eq!(s.status_headline().label, "CRITICAL: Only 2 days of medication left!");
        let s = schedule(&["08:00"], 4);
        assert_eq!(s.status_headline().color, IndicatorColor::Orange);
        let s = schedule(&["08:00"], 8);
        assert_eq!(s.status_headline().label, "Stock OK: 8 days remaining");
        let s = schedule(&["08:00"], 40);
        assert_eq!(s.status_headline().color, IndicatorColor::Green);
    }

    #[test]
    fn inactive_schedule_is_exempt_from_alerting() {
        let mut s = schedule(&["08:00"], 0);
        s.deactivate(date(2025, 1, 1));
        assert_eq!(s.status_headline().label, "This medication is inactive");
        assert!(!s.needs_refill());
        assert!(s.low_stock_alert(&AppConfig::default()).is_none());
    }

    #[test]
    fn action_availability() {
        let config = AppConfig::default();
        let s = schedule(&["08:00"], 10);
        assert!(s.offers_refill_action(&config));
        assert!(s.offers_record_dose());

        let s = schedule(&["08:00"], 11);
        assert!(!s.offers_refill_action(&config));

        let s = schedule(&["08:00"], 0);
        assert!(!s.offers_record_dose());
    }

    #[test]
    fn low_stock_alert_payload() {
        let s = schedule(&["08:00", "20:00"], 6);
        let alert = s.low_stock_alert(&AppConfig::default()).unwrap();
        assert_eq!(alert.subject, "Low Stock Alert: Metformin");
        assert_eq!(alert.days_until_depletion, 3);
        assert_eq!(alert.stock_unit, "Tablet");

        let s = schedule(&["08:00"], 6);
        assert!(s.low_stock_alert(&AppConfig::default()).is_none());
    }

    #[test]
    fn low_stock_sorted_most_urgent_first() {
        let mut inactive = schedule(&["08:00"], 0);
        inactive.is_active = false;
        let list = vec![
            schedule(&["08:00"], 4),
            schedule(&["08:00"], 50),
            schedule(&["08:00"], 1),
            inactive,
        ];
        let low = low_stock(&list, 5);
        let days: Vec<u32> = low.iter().map(|s| s.days_until_depletion()).collect();
        assert_eq!(days, vec![1, 4]);
    }

    #[test]
    fn due_within_window() {
        let now = date(2025, 5, 10).and_time(time(8, 10));
        let mut evening = schedule(&["20:00"], 5);
        evening.medication_name = "Atorvastatin".into();
        let mut inactive = schedule(&["08:00"], 5);
        inactive.is_active = false;
        let list = vec![schedule(&["07:45", "13:00"], 5), evening, inactive];

        let due = due_within(&list, now, 30);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].medication_name, "Metformin");
        assert_eq!(due[0].time, time(7, 45));
    }
}
