//! Notification kinds and priorities.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    AppointmentRequested,
    AppointmentConfirmed,
    AppointmentRejected,
    AppointmentCancelled,
    AppointmentCompleted,
    AppointmentReminder,
    PaymentReceived,
    PaymentRefunded,
    NewReview,
    NewMessage,
    CredentialVerified,
    CredentialRejected,
    AccountUpdate,
    System,
}

impl NotificationType {
    /// Priority used when the caller does not pick one.
    pub fn default_priority(self) -> NotificationPriority {
        match self {
            NotificationType::AppointmentRequested
            | NotificationType::AppointmentCancelled
            | NotificationType::AppointmentReminder
            | NotificationType::PaymentRefunded => NotificationPriority::High,
            NotificationType::NewMessage | NotificationType::AccountUpdate => {
                NotificationPriority::Low
            }
            _ => NotificationPriority::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// What a notification points at. Generic over the hash type so the zomes
/// can use their own action hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RelatedEntity<H> {
    Appointment(H),
    Payment(H),
    Review(H),
    Message(H),
    Credential(H),
    HealthRecord(H),
}

impl<H> RelatedEntity<H> {
    pub fn id(&self) -> &H {
        match self {
            RelatedEntity::Appointment(h)
            | RelatedEntity::Payment(h)
            | RelatedEntity::Review(h)
            | RelatedEntity::Message(h)
            | RelatedEntity::Credential(h)
            | RelatedEntity::HealthRecord(h) => h,
        }
    }
}

pub fn validate_content(title: &str, message: &str) -> CareResult<()> {
    if title.trim().is_empty() || title.len() > MAX_TITLE_LEN {
        return Err(CareError::validation(
            "title",
            format!("Title must be 1-{} characters", MAX_TITLE_LEN),
        ));
    }
    if message.trim().is_empty() || message.len() > MAX_MESSAGE_LEN {
        return Err(CareError::validation(
            "message",
            format!("Message must be 1-{} characters", MAX_MESSAGE_LEN),
        ));
    }
    Ok(())
}
