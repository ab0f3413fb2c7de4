use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ConsultationStatus, PaymentStatus, Priority, SenderType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationMessage {
    pub id: Uuid,
    pub sender_type: SenderType,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

/// Append-only message log of one consultation. Insertion order is
/// display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    pub(crate) messages: Vec<ConsultationMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub patient: String,
    pub patient_name: Option<String>,
    pub healthcare_provider: Option<String>,
    pub provider_name: Option<String>,
    pub consultation_date: Option<NaiveDateTime>,
    pub status: ConsultationStatus,
    pub priority: Priority,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
    pub consultation_fee: Option<f64>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub messages: Transcript,
}
