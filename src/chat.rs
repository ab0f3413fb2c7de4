//! Consultation chat: transcript ownership, bubble rendering and
//! read/unread accounting.
//!
//! A transcript is append-only: rendering never reorders or deduplicates,
//! and the only mutation after append is the counter-party's bulk
//! "mark all read".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{ConsultationMessage, SenderType, Transcript};

/// Shown instead of bubbles when a consultation has no messages.
pub const EMPTY_TRANSCRIPT_PLACEHOLDER: &str = "No messages yet. Start the conversation!";

/// chrono format used for the timestamp under each bubble.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Longest last-message preview before truncation.
pub const PREVIEW_MAX_CHARS: usize = 100;

// ═══════════════════════════════════════════
// Rendered types
// ═══════════════════════════════════════════

/// Which side of the thread a bubble sits on, relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Sent by the viewer.
    #[serde(rename = "self")]
    Own,
    #[serde(rename = "other")]
    Other,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Own => "self",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBubble {
    pub alignment: Alignment,
    pub content: String,
    pub sender_label: String,
    pub timestamp_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RenderedTranscript {
    Empty { placeholder: String },
    Bubbles { bubbles: Vec<RenderedBubble> },
}

impl RenderedTranscript {
    /// Rendered bubbles; empty for the placeholder state.
    pub fn bubbles(&self) -> &[RenderedBubble] {
        match self {
            Self::Empty { .. } => &[],
            Self::Bubbles { bubbles } => bubbles.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

// ═══════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════

/// Render one message for `viewer`. Used directly for pushed messages,
/// which arrive one at a time.
pub fn render_bubble(message: &ConsultationMessage, viewer: SenderType) -> RenderedBubble {
    let alignment = if message.sender_type == viewer {
        Alignment::Own
    } else {
        Alignment::Other
    };
    RenderedBubble {
        alignment,
        content: message.message.clone(),
        sender_label: message.sender_type.as_str().to_string(),
        timestamp_display: message.timestamp.format(TIMESTAMP_DISPLAY_FORMAT).to_string(),
    }
}

/// Render a full history in input order.
pub fn render_transcript(messages: &[ConsultationMessage], viewer: SenderType) -> RenderedTranscript {
    if messages.is_empty() {
        return RenderedTranscript::Empty {
            placeholder: EMPTY_TRANSCRIPT_PLACEHOLDER.to_string(),
        };
    }
    RenderedTranscript::Bubbles {
        bubbles: messages.iter().map(|m| render_bubble(m, viewer)).collect(),
    }
}

// ═══════════════════════════════════════════
// Read accounting
// ═══════════════════════════════════════════

/// Unread messages addressed to `target_role`, i.e. sent by the other side.
pub fn count_unread(messages: &[ConsultationMessage], target_role: SenderType) -> usize {
    messages
        .iter()
        .filter(|m| !m.is_read && m.sender_type != target_role)
        .count()
}

/// `from_role` reads everything its counterpart sent. Returns how many
/// messages changed; a second call returns 0.
pub fn mark_all_read(messages: &mut [ConsultationMessage], from_role: SenderType) -> usize {
    let sender = from_role.counterpart();
    let mut changed = 0;
    for m in messages.iter_mut().filter(|m| m.sender_type == sender && !m.is_read) {
        m.is_read = true;
        changed += 1;
    }
    changed
}

/// Truncate a message for list previews and notifications at
/// `PREVIEW_MAX_CHARS` characters, handling UTF-8 correctly.
pub fn message_preview(message: &str) -> String {
    let trimmed = message.trim();
    match trimmed.char_indices().nth(PREVIEW_MAX_CHARS) {
        None => trimmed.to_string(),
        Some((boundary, _)) => format!("{}...", &trimmed[..boundary]),
    }
}

// ═══════════════════════════════════════════
// Transcript
// ═══════════════════════════════════════════

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a history loaded from the document store, in stored order.
    pub fn from_messages(messages: Vec<ConsultationMessage>) -> Self {
        Self { messages }
    }

    /// Append a message, stamping it with `now`.
    pub fn append(
        &mut self,
        sender_type: SenderType,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<&ConsultationMessage, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::invalid("message", "must not be empty"));
        }
        self.messages.push(ConsultationMessage {
            id: Uuid::new_v4(),
            sender_type,
            message: text.to_string(),
            timestamp: now,
            is_read: false,
        });
        let appended = &self.messages[self.messages.len() - 1];
        tracing::debug!(message = %appended.id, sender = %sender_type, "Message appended");
        Ok(appended)
    }

    /// Append a message already stamped by the server, as delivered by a
    /// push event.
    pub fn push_delivered(&mut self, message: ConsultationMessage) -> &ConsultationMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ConsultationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn render(&self, viewer: SenderType) -> RenderedTranscript {
        render_transcript(&self.messages, viewer)
    }

    pub fn count_unread(&self, target_role: SenderType) -> usize {
        count_unread(&self.messages, target_role)
    }

    pub fn mark_all_read(&mut self, from_role: SenderType) -> usize {
        mark_all_read(&mut self.messages, from_role)
    }
}
