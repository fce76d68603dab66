use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::ticketmodel::TicketCategory;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Artisan,
    Admin,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Student => "student",
            UserRole::Artisan => "artisan",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub prenom: String,
    pub nom: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub telephone: Option<String>,
    // Artisan fields
    pub specialite: Option<TicketCategory>,
    pub is_active: bool,
    // Push device tokens, one per installed app instance
    pub fcm_tokens: Vec<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_to_str() {
        assert_eq!(UserRole::Student.to_str(), "student");
        assert_eq!(UserRole::Artisan.to_str(), "artisan");
        assert_eq!(UserRole::Admin.to_str(), "admin");
    }
}
