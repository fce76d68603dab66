use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::localmodel::{Local, LocalKind};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocalDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub kind: LocalKind,

    pub floors: Option<i32>,
    pub total_rooms: Option<i32>,
    pub category: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct LocalData {
    pub local: Local,
}

#[derive(Debug, Serialize)]
pub struct LocalResponseDto {
    pub status: String,
    pub data: LocalData,
}

#[derive(Debug, Serialize)]
pub struct LocalListResponseDto {
    pub status: String,
    pub locals: Vec<Local>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_local_wire_format() {
        let body = r#"{
            "name": "Building A",
            "kind": "building",
            "floors": 4,
            "total_rooms": 120
        }"#;

        let dto: CreateLocalDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.kind, LocalKind::Building);
        assert_eq!(dto.floors, Some(4));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_common_area_without_rooms() {
        let body = r#"{
            "name": "Salle de sport",
            "kind": "common_area",
            "category": "sport",
            "capacity": 30
        }"#;

        let dto: CreateLocalDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.kind, LocalKind::CommonArea);
        assert!(dto.total_rooms.is_none());
    }
}
