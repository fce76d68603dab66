use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ticketmodel::TicketCategory;

/// Third-party company a ticket can be handed off to when no internal
/// artisan takes it. Externalization validates the provider id against
/// this list before recording the provider's name on the ticket.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExternalProvider {
    pub id: Uuid,
    pub name: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub specialite: Option<TicketCategory>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
