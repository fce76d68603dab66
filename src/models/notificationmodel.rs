use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewTicket,
    Assignment,
    Completion,
    Validation,
}

impl NotificationKind {
    pub fn to_str(&self) -> &str {
        match self {
            NotificationKind::NewTicket => "new_ticket",
            NotificationKind::Assignment => "assignment",
            NotificationKind::Completion => "completion",
            NotificationKind::Validation => "validation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub ticket_id: Option<Uuid>,
    // Deep-link block mirroring the push payload, e.g. {"url": "/app/artisan", "ticketId": ...}
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationKind::NewTicket).unwrap();
        assert_eq!(json, "\"new_ticket\"");

        let parsed: NotificationKind = serde_json::from_str("\"assignment\"").unwrap();
        assert_eq!(parsed, NotificationKind::Assignment);
    }

    #[test]
    fn test_to_str() {
        assert_eq!(NotificationKind::NewTicket.to_str(), "new_ticket");
        assert_eq!(NotificationKind::Assignment.to_str(), "assignment");
        assert_eq!(NotificationKind::Completion.to_str(), "completion");
        assert_eq!(NotificationKind::Validation.to_str(), "validation");
    }
}
