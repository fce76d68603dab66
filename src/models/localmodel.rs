use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq)]
#[sqlx(type_name = "local_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocalKind {
    Building,
    CommonArea,
}

impl LocalKind {
    pub fn to_str(&self) -> &str {
        match self {
            LocalKind::Building => "building",
            LocalKind::CommonArea => "common_area",
        }
    }
}

/// A building or common area used for location tagging on tickets.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Local {
    pub id: Uuid,
    pub name: String,
    pub kind: LocalKind,
    // Building fields
    pub floors: Option<i32>,
    pub total_rooms: Option<i32>,
    // Common area fields
    pub category: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&LocalKind::CommonArea).unwrap();
        assert_eq!(json, "\"common_area\"");

        let parsed: LocalKind = serde_json::from_str("\"building\"").unwrap();
        assert_eq!(parsed, LocalKind::Building);
    }

    #[test]
    fn test_to_str() {
        assert_eq!(LocalKind::Building.to_str(), "building");
        assert_eq!(LocalKind::CommonArea.to_str(), "common_area");
    }
}
