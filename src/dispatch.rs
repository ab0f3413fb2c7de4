//! Typed form-event dispatch.
//!
//! Handlers are keyed by `(EntityKind, EventKind)`. Field events carry a
//! per-entity field enum, so a handler registered for a field of another
//! entity is rejected when the table is built rather than silently never
//! firing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::forms::{consultation, medication_schedule, prescription, provider, FormContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    MedicationSchedule,
    MedicalConsultation,
    HealthcareProvider,
    MedicalPrescription,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MedicationSchedule => "Medication Schedule",
            Self::MedicalConsultation => "Medical Consultation",
            Self::HealthcareProvider => "Healthcare Provider",
            Self::MedicalPrescription => "Medical Prescription",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleField {
    CurrentStock,
    Dosage,
    Frequency,
    Times,
    IsActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationField {
    HealthcareProvider,
    ConsultationDate,
    Status,
    PaymentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderField {
    Status,
    Specialty,
    Email,
    Phone,
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrescriptionField {
    PatientDob,
    ItemFrequency,
    ItemDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Schedule(ScheduleField),
    Consultation(ConsultationField),
    Provider(ProviderField),
    Prescription(PrescriptionField),
}

impl Field {
    pub fn entity(&self) -> EntityKind {
        match self {
            Self::Schedule(_) => EntityKind::MedicationSchedule,
            Self::Consultation(_) => EntityKind::MedicalConsultation,
            Self::Provider(_) => EntityKind::HealthcareProvider,
            Self::Prescription(_) => EntityKind::MedicalPrescription,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Refresh,
    FieldChanged(Field),
    BeforeSave,
    AfterSave,
}

pub type Handler = fn(&mut FormContext) -> Result<(), CoreError>;

#[derive(Default)]
pub struct DispatchTable {
    handlers: HashMap<(EntityKind, EventKind), Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Each `(entity, event)` pair takes one handler,
    /// and field events must name a field of `entity`.
    pub fn register(
        &mut self,
        entity: EntityKind,
        event: EventKind,
        handler: Handler,
    ) -> Result<(), CoreError> {
        if let EventKind::FieldChanged(field) = event {
            if field.entity() != entity {
                return Err(CoreError::MismatchedHandler {
                    entity: entity.as_str().into(),
                    event: format!("{event:?}"),
                });
            }
        }
        if self.handlers.contains_key(&(entity, event)) {
            return Err(CoreError::DuplicateHandler {
                entity: entity.as_str().into(),
                event: format!("{event:?}"),
            });
        }
        self.handlers.insert((entity, event), handler);
        Ok(())
    }

    pub fn handles(&self, entity: EntityKind, event: EventKind) -> bool {
        self.handlers.contains_key(&(entity, event))
    }

    /// Run the handler for `event` on the context's entity. Events with no
    /// handler are a no-op and return `Ok(false)`.
    pub fn dispatch(&self, ctx: &mut FormContext, event: EventKind) -> Result<bool, CoreError> {
        let entity = ctx.doc.kind();
        let Some(handler) = self.handlers.get(&(entity, event)) else {
            tracing::trace!(entity = entity.as_str(), ?event, "No handler");
            return Ok(false);
        };
        tracing::debug!(entity = entity.as_str(), ?event, "Dispatching form event");
        handler(ctx)?;
        Ok(true)
    }

    /// Table with every built-in form handler.
    pub fn standard() -> Result<Self, CoreError> {
        use EntityKind::*;
        use EventKind::*;

        let mut table = Self::new();

        let schedule_field = |f| FieldChanged(Field::Schedule(f));
        table.register(MedicationSchedule, Refresh, medication_schedule::refresh)?;
        for f in [
            ScheduleField::CurrentStock,
            ScheduleField::Dosage,
            ScheduleField::Frequency,
            ScheduleField::Times,
        ] {
            table.register(MedicationSchedule, schedule_field(f), medication_schedule::recalculate)?;
        }
        table.register(
            MedicationSchedule,
            schedule_field(ScheduleField::IsActive),
            medication_schedule::refresh,
        )?;
        table.register(MedicationSchedule, BeforeSave, medication_schedule::before_save)?;
        table.register(MedicationSchedule, AfterSave, medication_schedule::after_save)?;

        let consultation_field = |f| FieldChanged(Field::Consultation(f));
        table.register(MedicalConsultation, Refresh, consultation::refresh)?;
        table.register(
            MedicalConsultation,
            consultation_field(ConsultationField::HealthcareProvider),
            consultation::provider_changed,
        )?;
        table.register(
            MedicalConsultation,
            consultation_field(ConsultationField::ConsultationDate),
            consultation::date_changed,
        )?;
        table.register(
            MedicalConsultation,
            consultation_field(ConsultationField::Status),
            consultation::status_changed,
        )?;
        table.register(
            MedicalConsultation,
            consultation_field(ConsultationField::PaymentStatus),
            consultation::payment_status_changed,
        )?;
        table.register(MedicalConsultation, BeforeSave, consultation::before_save)?;

        let provider_field = |f| FieldChanged(Field::Provider(f));
        table.register(HealthcareProvider, Refresh, provider::refresh)?;
        table.register(
            HealthcareProvider,
            provider_field(ProviderField::Status),
            provider::status_changed,
        )?;
        table.register(
            HealthcareProvider,
            provider_field(ProviderField::Specialty),
            provider::specialty_changed,
        )?;
        table.register(HealthcareProvider, provider_field(ProviderField::Email), provider::email_changed)?;
        table.register(HealthcareProvider, provider_field(ProviderField::Phone), provider::phone_changed)?;
        table.register(
            HealthcareProvider,
            provider_field(ProviderField::Schedule),
            provider::schedule_changed,
        )?;
        table.register(HealthcareProvider, BeforeSave, provider::before_save)?;

        let prescription_field = |f| FieldChanged(Field::Prescription(f));
        table.register(
            MedicalPrescription,
            prescription_field(PrescriptionField::PatientDob),
            prescription::dob_changed,
        )?;
        for f in [PrescriptionField::ItemFrequency, PrescriptionField::ItemDuration] {
            table.register(MedicalPrescription, prescription_field(f), prescription::items_changed)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::forms::FormDoc;
    use crate::models::{Consultation, SenderType};
    use chrono::NaiveDate;

    fn noop(_: &mut FormContext) -> Result<(), CoreError> {
        Ok(())
    }

    fn consultation_ctx() -> FormContext {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        FormContext::new(
            FormDoc::Consultation(Consultation::new("CONS-1", "PAT-1")),
            SenderType::Patient,
            now,
            AppConfig::default(),
        )
    }

    #[test]
    fn standard_table_builds() {
        let table = DispatchTable::standard().unwrap();
        assert!(table.handles(EntityKind::MedicationSchedule, EventKind::Refresh));
        assert!(table.handles(
            EntityKind::MedicationSchedule,
            EventKind::FieldChanged(Field::Schedule(ScheduleField::Times))
        ));
        assert!(!table.handles(EntityKind::MedicalPrescription, EventKind::Refresh));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut table = DispatchTable::new();
        table.register(EntityKind::HealthcareProvider, EventKind::Refresh, noop).unwrap();
        let err = table
            .register(EntityKind::HealthcareProvider, EventKind::Refresh, noop)
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateHandler { .. }));
    }

    #[test]
    fn field_of_other_entity_rejected() {
        let mut table = DispatchTable::new();
        let err = table
            .register(
                EntityKind::MedicalConsultation,
                EventKind::FieldChanged(Field::Schedule(ScheduleField::CurrentStock)),
                noop,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::MismatchedHandler { .. }));
    }

    #[test]
    fn unhandled_event_is_noop() {
        let table = DispatchTable::new();
        let mut ctx = consultation_ctx();
        assert!(!table.dispatch(&mut ctx, EventKind::Refresh).unwrap());
    }

    #[test]
    fn dispatch_routes_by_document_kind() {
        let table = DispatchTable::standard().unwrap();
        let mut ctx = consultation_ctx();
        ctx.is_new = true;
        assert!(table.dispatch(&mut ctx, EventKind::Refresh).unwrap());
        assert!(ctx.dashboard.intro.is_some());
    }
}
