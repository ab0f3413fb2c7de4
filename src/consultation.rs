//! Consultation rules: status lifecycle, payment side effects,
//! indicators and the actions offered on the consultation form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{
    Consultation, ConsultationStatus, Indicator, IndicatorColor, PaymentStatus, Priority,
    SenderType, Transcript,
};

impl ConsultationStatus {
    pub fn indicator_color(&self) -> IndicatorColor {
        match self {
            Self::Pending => IndicatorColor::Gray,
            Self::Scheduled => IndicatorColor::Blue,
            Self::InProgress => IndicatorColor::Orange,
            Self::Completed => IndicatorColor::Green,
            Self::Cancelled => IndicatorColor::Red,
        }
    }

    /// Allowed edges of the lifecycle. Completed and Cancelled are final.
    pub fn can_transition_to(&self, to: ConsultationStatus) -> bool {
        use ConsultationStatus::*;
        matches!(
            (*self, to),
            (Pending, Scheduled)
                | (Pending, Cancelled)
                | (Scheduled, InProgress)
                | (Scheduled, Cancelled)
                | (InProgress, Completed)
        )
    }

    pub fn allows_chat(&self) -> bool {
        matches!(self, Self::Scheduled | Self::InProgress)
    }
}

impl Priority {
    /// Dashboard badge; Normal priority shows nothing.
    pub fn indicator(&self) -> Option<Indicator> {
        let color = match self {
            Self::Normal => return None,
            Self::Low => IndicatorColor::Gray,
            Self::High => IndicatorColor::Orange,
            Self::Urgent => IndicatorColor::Red,
        };
        Some(Indicator::new(format!("Priority: {}", self.as_str()), color))
    }
}

/// Buttons the consultation form can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationAction {
    StartChat,
    Confirm,
    Cancel,
    Start,
    Complete,
    ViewProviderProfile,
    MarkMessagesRead,
}

impl ConsultationAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartChat => "Start Chat",
            Self::Confirm => "Confirm",
            Self::Cancel => "Cancel",
            Self::Start => "Start",
            Self::Complete => "Complete",
            Self::ViewProviderProfile => "View Provider Profile",
            Self::MarkMessagesRead => "Mark Messages as Read",
        }
    }

    /// Button group the action is listed under.
    pub fn group(&self) -> &'static str {
        match self {
            Self::StartChat | Self::ViewProviderProfile => "Actions",
            Self::Confirm | Self::Cancel | Self::Start | Self::Complete => "Status",
            Self::MarkMessagesRead => "Messages",
        }
    }
}

impl Consultation {
    pub fn new(id: &str, patient: &str) -> Self {
        Self {
            id: id.into(),
            patient: patient.into(),
            patient_name: None,
            healthcare_provider: None,
            provider_name: None,
            consultation_date: None,
            status: ConsultationStatus::Pending,
            priority: Priority::Normal,
            payment_status: PaymentStatus::Unpaid,
            payment_date: None,
            consultation_fee: None,
            notes: None,
            cancellation_reason: None,
            messages: Transcript::new(),
        }
    }

    pub fn status_indicator(&self) -> Indicator {
        Indicator::new(self.status.as_str(), self.status.indicator_color())
    }

    /// Badge for unread messages addressed to `viewer`.
    pub fn unread_indicator(&self, viewer: SenderType) -> Option<Indicator> {
        let unread = self.messages.count_unread(viewer);
        (unread > 0).then(|| {
            Indicator::new(format!("Unread Messages: {unread}"), IndicatorColor::Red)
        })
    }

    /// Buttons for the current state of a saved consultation.
    pub fn available_actions(&self) -> Vec<ConsultationAction> {
        use ConsultationAction::*;
        let mut actions = Vec::new();
        if self.status.allows_chat() {
            actions.push(StartChat);
        }
        match self.status {
            ConsultationStatus::Pending => actions.extend([Confirm, Cancel]),
            ConsultationStatus::Scheduled => actions.push(Start),
            ConsultationStatus::InProgress => actions.push(Complete),
            ConsultationStatus::Completed | ConsultationStatus::Cancelled => {}
        }
        if self.healthcare_provider.is_some() {
            actions.push(ViewProviderProfile);
        }
        if !self.messages.is_empty() {
            actions.push(MarkMessagesRead);
        }
        actions
    }

    /// Move to `to` along an allowed edge. Completing an unpaid
    /// consultation marks it paid. Returns the previous status.
    pub fn transition(&mut self, to: ConsultationStatus) -> Result<ConsultationStatus, CoreError> {
        let from = self.status;
        if !from.can_transition_to(to) {
            tracing::warn!(consultation = %self.id, %from, %to, "Rejected status change");
            return Err(CoreError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        if to == ConsultationStatus::Completed && self.payment_status == PaymentStatus::Unpaid {
            self.payment_status = PaymentStatus::Paid;
        }
        tracing::info!(consultation = %self.id, %from, %to, "Status updated");
        Ok(from)
    }

    /// Cancel with a reason. A paid consultation is refunded.
    pub fn cancel(&mut self, reason: &str) -> Result<(), CoreError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CoreError::invalid("reason", "a cancellation reason is required"));
        }
        self.transition(ConsultationStatus::Cancelled)?;
        self.cancellation_reason = Some(reason.to_string());
        if self.payment_status == PaymentStatus::Paid {
            self.payment_status = PaymentStatus::Refunded;
        }
        Ok(())
    }

    /// Complete-dialog submission: append final notes, set the chosen
    /// payment status, then complete.
    pub fn complete(
        &mut self,
        final_notes: Option<&str>,
        payment_status: PaymentStatus,
    ) -> Result<(), CoreError> {
        if !self.status.can_transition_to(ConsultationStatus::Completed) {
            return Err(CoreError::InvalidTransition {
                from: self.status.to_string(),
                to: ConsultationStatus::Completed.to_string(),
            });
        }
        if let Some(extra) = final_notes.map(str::trim).filter(|n| !n.is_empty()) {
            let notes = self.notes.take().unwrap_or_default();
            self.notes = Some(format!("{notes}\n\n{extra}"));
        }
        self.payment_status = payment_status;
        self.transition(ConsultationStatus::Completed)?;
        Ok(())
    }

    /// Payment status edit. Becoming paid stamps today's date once.
    pub fn set_payment_status(&mut self, status: PaymentStatus, today: NaiveDate) {
        self.payment_status = status;
        if status == PaymentStatus::Paid && self.payment_date.is_none() {
            self.payment_date = Some(today);
        }
    }

    /// Before-save check: a pending consultation cannot be booked in the past.
    pub fn validate_for_save(&self, now: NaiveDateTime) -> Result<(), CoreError> {
        match self.consultation_date {
            Some(date) if date < now && self.status == ConsultationStatus::Pending => Err(
                CoreError::invalid("consultation_date", "cannot book consultation in the past"),
            ),
            _ => Ok(()),
        }
    }
}
