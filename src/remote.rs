//! Outbound remote-call requests and inbound push events.
//!
//! Forms never perform I/O. They enqueue `RemoteCall`s on a `CallQueue`
//! and the host drains the queue into its transport. Calls are
//! fire-and-forget: completion is observed as a document reload, not as
//! a return value.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ConsultationMessage, ConsultationStatus, PaymentStatus, SenderType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RemoteCall {
    UpdateStock {
        schedule_id: Uuid,
        new_stock: u32,
    },
    DeactivateMedication {
        schedule_id: Uuid,
    },
    ActivateMedication {
        schedule_id: Uuid,
    },
    SendMessage {
        consultation_id: String,
        sender_type: SenderType,
        message: String,
    },
    MarkMessagesRead {
        consultation_id: String,
        /// Messages from this sender are marked read.
        sender_type: SenderType,
    },
    CheckAvailability {
        provider_id: String,
        consultation_date: NaiveDateTime,
    },
    UpdateConsultationStatus {
        consultation_id: String,
        new_status: ConsultationStatus,
    },
    UpdatePaymentStatus {
        consultation_id: String,
        payment_status: PaymentStatus,
    },
    CancelConsultation {
        consultation_id: String,
        reason: String,
    },
    FetchProviderProfile {
        provider_id: String,
    },
}

impl RemoteCall {
    pub fn method(&self) -> &'static str {
        match self {
            Self::UpdateStock { .. } => "update_stock",
            Self::DeactivateMedication { .. } => "deactivate_medication",
            Self::ActivateMedication { .. } => "activate_medication",
            Self::SendMessage { .. } => "send_message",
            Self::MarkMessagesRead { .. } => "mark_messages_read",
            Self::CheckAvailability { .. } => "check_availability",
            Self::UpdateConsultationStatus { .. } => "update_consultation_status",
            Self::UpdatePaymentStatus { .. } => "update_payment_status",
            Self::CancelConsultation { .. } => "cancel_consultation",
            Self::FetchProviderProfile { .. } => "fetch_provider_profile",
        }
    }
}

/// Transport for remote calls, implemented by the host.
pub trait RemoteProcedure {
    fn submit(&mut self, call: RemoteCall);
}

/// Ordered buffer of calls raised while handling one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallQueue {
    calls: Vec<RemoteCall>,
}

impl CallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: RemoteCall) {
        tracing::debug!(method = call.method(), "Remote call queued");
        self.calls.push(call);
    }

    pub fn pending(&self) -> &[RemoteCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Hand every queued call to `transport`, in the order raised.
    pub fn drain_into(&mut self, transport: &mut dyn RemoteProcedure) -> usize {
        let n = self.calls.len();
        for call in self.calls.drain(..) {
            transport.submit(call);
        }
        n
    }
}

/// Push notification for a message appended on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageEvent {
    pub consultation_id: String,
    pub message: ConsultationMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<RemoteCall>);

    impl RemoteProcedure for Recorder {
        fn submit(&mut self, call: RemoteCall) {
            self.0.push(call);
        }
    }

    #[test]
    fn drain_preserves_order_and_empties_queue() {
        let id = Uuid::new_v4();
        let mut queue = CallQueue::new();
        queue.push(RemoteCall::UpdateStock { schedule_id: id, new_stock: 3 });
        queue.push(RemoteCall::DeactivateMedication { schedule_id: id });

        let mut recorder = Recorder::default();
        assert_eq!(queue.drain_into(&mut recorder), 2);
        assert!(queue.is_empty());
        assert_eq!(recorder.0[0].method(), "update_stock");
        assert_eq!(recorder.0[1].method(), "deactivate_medication");
    }

    #[test]
    fn serializes_with_method_tag() {
        let call = RemoteCall::MarkMessagesRead {
            consultation_id: "CONS-0001".into(),
            sender_type: SenderType::Provider,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["method"], "mark_messages_read");
        assert_eq!(json["sender_type"], "Provider");
    }
}
