//! Form view-model and per-entity event handlers.
//!
//! A `FormContext` is the only state a handler sees: the loaded document,
//! who is looking at it, the clock reading for this event, and the
//! presentation/outbound state the handler writes to. Nothing is global.

pub mod consultation;
pub mod medication_schedule;
pub mod prescription;
pub mod provider;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::dispatch::EntityKind;
use crate::error::CoreError;
use crate::medications::LowStockAlert;
use crate::models::{
    Consultation, HealthcareProvider, Indicator, IndicatorColor, MedicationSchedule, Prescription,
    SenderType,
};
use crate::remote::{CallQueue, RemoteCall};

// ═══════════════════════════════════════════
// Presentation state
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub label: String,
    pub group: String,
}

/// Modal message raised by a handler (validation feedback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMessage {
    pub title: String,
    pub message: String,
    pub color: IndicatorColor,
}

/// Everything the presentation layer draws around the form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub headline: Option<Indicator>,
    pub page_indicator: Option<Indicator>,
    pub indicators: Vec<Indicator>,
    pub intro: Option<Indicator>,
    pub buttons: Vec<ActionButton>,
    pub messages: Vec<FormMessage>,
}

impl Dashboard {
    pub fn add_button(&mut self, label: &str, group: &str) {
        self.buttons.push(ActionButton {
            label: label.into(),
            group: group.into(),
        });
    }

    pub fn has_button(&self, label: &str) -> bool {
        self.buttons.iter().any(|b| b.label == label)
    }

    pub fn clear_buttons(&mut self) {
        self.buttons.clear();
    }

    /// Replace any indicator with the same label prefix.
    pub fn set_indicator(&mut self, prefix: &str, indicator: Option<Indicator>) {
        self.indicators.retain(|i| !i.label.starts_with(prefix));
        self.indicators.extend(indicator);
    }

    pub fn msgprint(&mut self, title: &str, message: impl Into<String>, color: IndicatorColor) {
        self.messages.push(FormMessage {
            title: title.into(),
            message: message.into(),
            color,
        });
    }
}

// ═══════════════════════════════════════════
// Documents
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "doctype")]
pub enum FormDoc {
    MedicationSchedule(MedicationSchedule),
    Consultation(Consultation),
    HealthcareProvider(HealthcareProvider),
    Prescription(Prescription),
}

impl FormDoc {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::MedicationSchedule(_) => EntityKind::MedicationSchedule,
            Self::Consultation(_) => EntityKind::MedicalConsultation,
            Self::HealthcareProvider(_) => EntityKind::HealthcareProvider,
            Self::Prescription(_) => EntityKind::MedicalPrescription,
        }
    }
}

// ═══════════════════════════════════════════
// FormContext
// ═══════════════════════════════════════════

/// View-model passed by `&mut` to every handler.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub doc: FormDoc,
    /// Not yet saved to the document store.
    pub is_new: bool,
    pub viewer: SenderType,
    /// Clock reading for the event being handled.
    pub now: NaiveDateTime,
    pub config: AppConfig,
    pub dashboard: Dashboard,
    pub calls: CallQueue,
    pub alerts: Vec<LowStockAlert>,
    /// Set when a mutating call was issued; the host reloads the document
    /// once the call completes.
    pub needs_reload: bool,
}

impl FormContext {
    pub fn new(doc: FormDoc, viewer: SenderType, now: NaiveDateTime, config: AppConfig) -> Self {
        Self {
            doc,
            is_new: false,
            viewer,
            now,
            config,
            dashboard: Dashboard::default(),
            calls: CallQueue::new(),
            alerts: Vec::new(),
            needs_reload: false,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Queue a mutating call; the form reloads after it completes.
    pub fn request(&mut self, call: RemoteCall) {
        self.calls.push(call);
        self.needs_reload = true;
    }

    /// Queue a read-only call.
    pub fn query(&mut self, call: RemoteCall) {
        self.calls.push(call);
    }

    fn wrong_entity(&self, expected: EntityKind) -> CoreError {
        CoreError::WrongEntity {
            expected: expected.as_str().into(),
            actual: self.doc.kind().as_str().into(),
        }
    }

    pub fn schedule(&self) -> Result<&MedicationSchedule, CoreError> {
        match &self.doc {
            FormDoc::MedicationSchedule(s) => Ok(s),
            _ => Err(self.wrong_entity(EntityKind::MedicationSchedule)),
        }
    }

    pub fn schedule_mut(&mut self) -> Result<&mut MedicationSchedule, CoreError> {
        let err = self.wrong_entity(EntityKind::MedicationSchedule);
        match &mut self.doc {
            FormDoc::MedicationSchedule(s) => Ok(s),
            _ => Err(err),
        }
    }

    pub fn consultation(&self) -> Result<&Consultation, CoreError> {
        match &self.doc {
            FormDoc::Consultation(c) => Ok(c),
            _ => Err(self.wrong_entity(EntityKind::MedicalConsultation)),
        }
    }

    pub fn consultation_mut(&mut self) -> Result<&mut Consultation, CoreError> {
        let err = self.wrong_entity(EntityKind::MedicalConsultation);
        match &mut self.doc {
            FormDoc::Consultation(c) => Ok(c),
            _ => Err(err),
        }
    }

    pub fn provider(&self) -> Result<&HealthcareProvider, CoreError> {
        match &self.doc {
            FormDoc::HealthcareProvider(p) => Ok(p),
            _ => Err(self.wrong_entity(EntityKind::HealthcareProvider)),
        }
    }

    pub fn provider_mut(&mut self) -> Result<&mut HealthcareProvider, CoreError> {
        let err = self.wrong_entity(EntityKind::HealthcareProvider);
        match &mut self.doc {
            FormDoc::HealthcareProvider(p) => Ok(p),
            _ => Err(err),
        }
    }

    pub fn prescription(&self) -> Result<&Prescription, CoreError> {
        match &self.doc {
            FormDoc::Prescription(p) => Ok(p),
            _ => Err(self.wrong_entity(EntityKind::MedicalPrescription)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx(doc: FormDoc) -> FormContext {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        FormContext::new(doc, SenderType::Patient, now, AppConfig::default())
    }

    #[test]
    fn accessor_on_wrong_entity_errors() {
        let mut c = ctx(FormDoc::Consultation(Consultation::new("CONS-1", "PAT-1")));
        assert!(c.consultation().is_ok());
        match c.schedule_mut() {
            Err(CoreError::WrongEntity { expected, actual }) => {
                assert_eq!(expected, "Medication Schedule");
                assert_eq!(actual, "Medical Consultation");
            }
            other => panic!("expected WrongEntity, got {other:?}"),
        }
    }

    #[test]
    fn request_marks_reload_but_query_does_not() {
        let mut c = ctx(FormDoc::HealthcareProvider(HealthcareProvider::new("PROV-1", "Dr. A")));
        c.query(RemoteCall::FetchProviderProfile { provider_id: "PROV-1".into() });
        assert!(!c.needs_reload);
        c.request(RemoteCall::CancelConsultation {
            consultation_id: "CONS-1".into(),
            reason: "x".into(),
        });
        assert!(c.needs_reload);
        assert_eq!(c.calls.pending().len(), 2);
    }

    #[test]
    fn set_indicator_replaces_by_prefix() {
        let mut d = Dashboard::default();
        d.set_indicator("Unread", Some(Indicator::new("Unread Messages: 2", IndicatorColor::Red)));
        d.set_indicator("Unread", Some(Indicator::new("Unread Messages: 1", IndicatorColor::Red)));
        assert_eq!(d.indicators.len(), 1);
        d.set_indicator("Unread", None);
        assert!(d.indicators.is_empty());
    }
}
