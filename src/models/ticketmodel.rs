// src/models/ticketmodel.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InProgress,
    TermineArtisan,
    Completed,
    Cancelled,
    Externalized,
}

impl TicketStatus {
    pub fn to_str(&self) -> &str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::TermineArtisan => "termine_artisan",
            TicketStatus::Completed => "completed",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Externalized => "externalized",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Plumbing,
    Electrical,
    Cleaning,
    Wifi,
    Other,
}

impl TicketCategory {
    pub fn to_str(&self) -> &str {
        match self {
            TicketCategory::Plumbing => "plumbing",
            TicketCategory::Electrical => "electrical",
            TicketCategory::Cleaning => "cleaning",
            TicketCategory::Wifi => "wifi",
            TicketCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "ticket_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    Urgent,
    Planifier,
}

impl TicketType {
    pub fn to_str(&self) -> &str {
        match self {
            TicketType::Urgent => "urgent",
            TicketType::Planifier => "planifier",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub category: TicketCategory,
    pub description: String,
    pub location: String,
    pub is_urgent: bool,
    pub ticket_type: TicketType,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub status: TicketStatus,
    pub assigned_to_id: Option<Uuid>,
    pub assigned_to_name: Option<String>,
    pub externalized_to_name: Option<String>,
    pub image_urls: Vec<String>,
    pub audio_url: Option<String>,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
    pub rating: Option<i32>,
    pub student_comment: Option<String>,
    pub cancel_reason: Option<String>,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload once names, media URLs and urgency have been resolved.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub student_id: Uuid,
    pub student_name: String,
    pub category: TicketCategory,
    pub description: String,
    pub location: String,
    pub is_urgent: bool,
    pub ticket_type: TicketType,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub image_urls: Vec<String>,
    pub audio_url: Option<String>,
}

/// Write payload for the two routing transitions. Whichever handler side is
/// set, the other is cleared in the same UPDATE, so a ticket can never point
/// at an artisan and a provider at once.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingUpdate {
    pub status: TicketStatus,
    pub assigned_to_id: Option<Uuid>,
    pub assigned_to_name: Option<String>,
    pub externalized_to_name: Option<String>,
}

impl RoutingUpdate {
    pub fn assign(artisan_id: Uuid, artisan_name: &str) -> Self {
        RoutingUpdate {
            status: TicketStatus::InProgress,
            assigned_to_id: Some(artisan_id),
            assigned_to_name: Some(artisan_name.to_string()),
            externalized_to_name: None,
        }
    }

    pub fn externalize(provider_name: &str) -> Self {
        RoutingUpdate {
            status: TicketStatus::Externalized,
            assigned_to_id: None,
            assigned_to_name: None,
            externalized_to_name: Some(provider_name.to_string()),
        }
    }
}

/// Write payload for student validation: the rating lands in the same UPDATE
/// that moves the ticket to completed, never on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationUpdate {
    pub status: TicketStatus,
    pub rating: i32,
    pub student_comment: Option<String>,
}

impl ValidationUpdate {
    pub fn new(rating: i32, comment: Option<String>) -> Self {
        ValidationUpdate {
            status: TicketStatus::Completed,
            rating,
            student_comment: comment,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketQueryParams {
    pub status: Option<TicketStatus>,
    pub category: Option<TicketCategory>,
    pub urgent: Option<bool>,
    pub archived: Option<bool>,
}

/// The store returns tickets unordered; display order is urgent first,
/// then newest first within each group.
pub fn sort_for_display(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| {
        b.is_urgent
            .cmp(&a.is_urgent)
            .then(b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_ticket(is_urgent: bool, created_secs: i64) -> Ticket {
        let created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        Ticket {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            student_name: "Awa Diallo".to_string(),
            category: TicketCategory::Plumbing,
            description: "Fuite d'eau".to_string(),
            location: "Building A - Room 101".to_string(),
            is_urgent,
            ticket_type: if is_urgent {
                TicketType::Urgent
            } else {
                TicketType::Planifier
            },
            scheduled_date: None,
            scheduled_time: None,
            status: TicketStatus::Pending,
            assigned_to_id: None,
            assigned_to_name: None,
            externalized_to_name: None,
            image_urls: vec![],
            audio_url: None,
            before_photo_url: None,
            after_photo_url: None,
            rating: None,
            student_comment: None,
            cancel_reason: None,
            archived: false,
            created_at,
            validated_at: None,
            completed_at: None,
            cancelled_at: None,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_sort_urgent_first_then_recency() {
        let mut tickets = vec![
            sample_ticket(false, 300),
            sample_ticket(true, 100),
            sample_ticket(false, 400),
            sample_ticket(true, 200),
        ];

        sort_for_display(&mut tickets);

        let order: Vec<(bool, i64)> = tickets
            .iter()
            .map(|t| (t.is_urgent, t.created_at.timestamp()))
            .collect();
        assert_eq!(
            order,
            vec![(true, 200), (true, 100), (false, 400), (false, 300)]
        );
    }

    #[test]
    fn test_routing_update_sets_exactly_one_handler() {
        let artisan_id = Uuid::new_v4();
        let assign = RoutingUpdate::assign(artisan_id, "Moussa Ba");
        assert_eq!(assign.status, TicketStatus::InProgress);
        assert_eq!(assign.assigned_to_id, Some(artisan_id));
        assert_eq!(assign.assigned_to_name.as_deref(), Some("Moussa Ba"));
        assert!(assign.externalized_to_name.is_none());

        let externalize = RoutingUpdate::externalize("SenPlomberie");
        assert_eq!(externalize.status, TicketStatus::Externalized);
        assert!(externalize.assigned_to_id.is_none());
        assert!(externalize.assigned_to_name.is_none());
        assert_eq!(
            externalize.externalized_to_name.as_deref(),
            Some("SenPlomberie")
        );
    }

    #[test]
    fn test_validation_update_pairs_rating_with_completed() {
        let update = ValidationUpdate::new(4, Some("Bon travail".to_string()));
        assert_eq!(update.status, TicketStatus::Completed);
        assert_eq!(update.rating, 4);
        assert_eq!(update.student_comment.as_deref(), Some("Bon travail"));

        let no_comment = ValidationUpdate::new(5, None);
        assert_eq!(no_comment.status, TicketStatus::Completed);
        assert!(no_comment.student_comment.is_none());
    }

    #[test]
    fn test_query_filters_are_independent() {
        let params: TicketQueryParams =
            serde_json::from_value(serde_json::json!({ "status": "pending" })).unwrap();
        assert_eq!(params.status, Some(TicketStatus::Pending));
        assert!(params.category.is_none());
        assert!(params.urgent.is_none());
        assert!(params.archived.is_none());

        let params: TicketQueryParams = serde_json::from_value(serde_json::json!({
            "category": "wifi",
            "urgent": true,
        }))
        .unwrap();
        assert!(params.status.is_none());
        assert_eq!(params.category, Some(TicketCategory::Wifi));
        assert_eq!(params.urgent, Some(true));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TicketStatus::TermineArtisan).unwrap();
        assert_eq!(json, "\"termine_artisan\"");

        let parsed: TicketStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, TicketStatus::InProgress);
    }

    #[test]
    fn test_to_str() {
        assert_eq!(TicketStatus::TermineArtisan.to_str(), "termine_artisan");
        assert_eq!(TicketCategory::Wifi.to_str(), "wifi");
        assert_eq!(TicketType::Planifier.to_str(), "planifier");
    }
}
