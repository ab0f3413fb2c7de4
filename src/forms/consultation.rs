//! Medical Consultation form: status/priority/unread indicators, status
//! buttons, payment stamping, chat actions and live message delivery.

use crate::chat::{render_bubble, RenderedBubble, RenderedTranscript};
use crate::consultation::ConsultationAction;
use crate::error::CoreError;
use crate::models::{ConsultationStatus, Indicator, IndicatorColor, PaymentStatus};
use crate::remote::{NewMessageEvent, RemoteCall};

use super::FormContext;

pub const NEW_CONSULTATION_INTRO: &str = "Book a new consultation with a healthcare provider";

pub fn refresh(ctx: &mut FormContext) -> Result<(), CoreError> {
    let consultation = ctx.consultation()?;
    let actions = consultation.available_actions();
    let status = consultation.status_indicator();
    let priority = consultation.priority.indicator();
    let unread = consultation.unread_indicator(ctx.viewer);

    ctx.dashboard.clear_buttons();
    if ctx.is_new {
        ctx.dashboard.intro = Some(Indicator::new(NEW_CONSULTATION_INTRO, IndicatorColor::Blue));
    } else {
        ctx.dashboard.intro = None;
        for action in actions {
            ctx.dashboard.add_button(action.label(), action.group());
        }
    }
    ctx.dashboard.page_indicator = Some(status);
    ctx.dashboard.set_indicator("Priority", priority);
    ctx.dashboard.set_indicator("Unread", unread);
    Ok(())
}

/// Provider picked: fetch its profile so the form can fill name and fee.
pub fn provider_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    if let Some(provider_id) = ctx.consultation()?.healthcare_provider.clone() {
        ctx.query(RemoteCall::FetchProviderProfile { provider_id });
    }
    Ok(())
}

/// Ask for availability once both provider and date are known.
pub fn date_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let consultation = ctx.consultation()?;
    if let (Some(provider_id), Some(consultation_date)) = (
        consultation.healthcare_provider.clone(),
        consultation.consultation_date,
    ) {
        ctx.query(RemoteCall::CheckAvailability {
            provider_id,
            consultation_date,
        });
    }
    Ok(())
}

pub fn status_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    refresh(ctx)
}

pub fn payment_status_changed(ctx: &mut FormContext) -> Result<(), CoreError> {
    let today = ctx.today();
    let consultation = ctx.consultation_mut()?;
    let status = consultation.payment_status;
    consultation.set_payment_status(status, today);
    Ok(())
}

pub fn before_save(ctx: &mut FormContext) -> Result<(), CoreError> {
    let result = ctx.consultation()?.validate_for_save(ctx.now);
    if let Err(CoreError::InvalidInput { reason, .. }) = &result {
        ctx.dashboard
            .msgprint("Invalid Date", reason.clone(), IndicatorColor::Red);
    }
    result
}

// ═══════════════════════════════════════════
// Button actions
// ═══════════════════════════════════════════

/// Confirm / Start buttons. The edge is checked locally before the call
/// goes out; the document itself changes on reload.
pub fn update_status(ctx: &mut FormContext, new_status: ConsultationStatus) -> Result<(), CoreError> {
    let mut next = ctx.consultation()?.clone();
    next.transition(new_status)?;
    ctx.request(RemoteCall::UpdateConsultationStatus {
        consultation_id: next.id,
        new_status,
    });
    Ok(())
}

pub fn cancel(ctx: &mut FormContext, reason: &str) -> Result<(), CoreError> {
    let mut next = ctx.consultation()?.clone();
    next.cancel(reason)?;
    ctx.request(RemoteCall::CancelConsultation {
        consultation_id: next.id,
        reason: reason.trim().to_string(),
    });
    Ok(())
}

/// Complete dialog: final notes and the chosen payment status are applied
/// to the form, then status and payment calls are issued.
pub fn complete(
    ctx: &mut FormContext,
    final_notes: Option<&str>,
    payment_status: PaymentStatus,
) -> Result<(), CoreError> {
    let today = ctx.today();
    let consultation = ctx.consultation_mut()?;
    consultation.complete(final_notes, payment_status)?;
    let payment_status = consultation.payment_status;
    consultation.set_payment_status(payment_status, today);
    let consultation_id = consultation.id.clone();

    ctx.request(RemoteCall::UpdateConsultationStatus {
        consultation_id: consultation_id.clone(),
        new_status: ConsultationStatus::Completed,
    });
    ctx.request(RemoteCall::UpdatePaymentStatus {
        consultation_id,
        payment_status,
    });
    Ok(())
}

/// Send `text` as the viewer. The message reaches the transcript through
/// the server's push event.
pub fn send_message(ctx: &mut FormContext, text: &str) -> Result<(), CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::invalid("message", "must not be empty"));
    }
    let consultation = ctx.consultation()?;
    if !consultation.status.allows_chat() {
        return Err(CoreError::invalid(
            "status",
            format!("chat is not available for a {} consultation", consultation.status),
        ));
    }
    let consultation_id = consultation.id.clone();
    ctx.request(RemoteCall::SendMessage {
        consultation_id,
        sender_type: ctx.viewer,
        message: text.to_string(),
    });
    Ok(())
}

/// Mark everything the other side sent as read.
pub fn mark_all_read(ctx: &mut FormContext) -> Result<(), CoreError> {
    let consultation_id = ctx.consultation()?.id.clone();
    ctx.request(RemoteCall::MarkMessagesRead {
        consultation_id,
        sender_type: ctx.viewer.counterpart(),
    });
    Ok(())
}

/// Chat dialog contents for the viewer.
pub fn open_chat(ctx: &FormContext) -> Result<RenderedTranscript, CoreError> {
    if !ctx.consultation()?.status.allows_chat() {
        return Err(CoreError::invalid("status", "chat is only available while scheduled or in progress"));
    }
    Ok(ctx.consultation()?.messages.render(ctx.viewer))
}

/// Deliver a pushed message. Events for other consultations are ignored;
/// otherwise the message is appended and its bubble returned for display.
pub fn receive(ctx: &mut FormContext, event: &NewMessageEvent) -> Option<RenderedBubble> {
    let viewer = ctx.viewer;
    let consultation = ctx.consultation_mut().ok()?;
    if consultation.id != event.consultation_id {
        return None;
    }
    let bubble = render_bubble(
        consultation.messages.push_delivered(event.message.clone()),
        viewer,
    );
    let unread = consultation.unread_indicator(viewer);
    ctx.dashboard.set_indicator("Unread", unread);
    if !ctx.is_new && !ctx.dashboard.has_button(ConsultationAction::MarkMessagesRead.label()) {
        let action = ConsultationAction::MarkMessagesRead;
        ctx.dashboard.add_button(action.label(), action.group());
    }
    Some(bubble)
}
