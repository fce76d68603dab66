use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ticketmodel::{Ticket, TicketCategory, TicketType};

/// Create payload. `location` is free text; alternatively the client sends
/// `local_id` (plus an optional room) and the server resolves the text.
/// Media has already been uploaded as base64 and comes back here as URLs.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketDto {
    pub category: TicketCategory,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub location: Option<String>,
    pub local_id: Option<Uuid>,
    pub room: Option<String>,

    pub ticket_type: TicketType,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,

    #[serde(default)]
    pub image_urls: Vec<String>,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTicketDto {
    pub artisan_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalizeTicketDto {
    pub provider_id: Uuid,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct BeforePhotoDto {
    #[validate(length(min = 1, message = "Photo payload is required"))]
    pub photo: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTicketDto {
    #[validate(length(min = 1, message = "Photo payload is required"))]
    pub photo: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTicketDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelTicketDto {
    pub reason: Option<String>,
}

/// Pre-creation media upload: a base64 data URL plus the client's label for
/// the file (photo_1.jpg, note vocale.mp3, ...).
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UploadMediaDto {
    #[validate(length(min = 1, message = "Media payload is required"))]
    pub data: String,

    #[validate(length(min = 1, message = "Label is required"))]
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct TicketData {
    pub ticket: Ticket,
}

#[derive(Debug, Serialize)]
pub struct TicketResponseDto {
    pub status: String,
    pub data: TicketData,
}

#[derive(Debug, Serialize)]
pub struct TicketListResponseDto {
    pub status: String,
    pub tickets: Vec<Ticket>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ticket_wire_format() {
        let body = r#"{
            "category": "plumbing",
            "description": "Fuite sous le lavabo",
            "local_id": "7f9c24e5-3b30-4f0c-9a48-50c1df1b56b0",
            "room": "101",
            "ticket_type": "urgent"
        }"#;

        let dto: CreateTicketDto = serde_json::from_str(body).unwrap();
        assert_eq!(dto.category, TicketCategory::Plumbing);
        assert_eq!(dto.ticket_type, TicketType::Urgent);
        assert!(dto.location.is_none());
        assert!(dto.image_urls.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_ticket_requires_description() {
        let dto = CreateTicketDto {
            category: TicketCategory::Wifi,
            description: "".to_string(),
            location: Some("Building A".to_string()),
            local_id: None,
            room: None,
            ticket_type: TicketType::Urgent,
            scheduled_date: None,
            scheduled_time: None,
            image_urls: vec![],
            audio_url: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_rating_range() {
        for rating in [0, 6, -1] {
            let dto = ValidateTicketDto {
                rating,
                comment: None,
            };
            assert!(dto.validate().is_err(), "rating {} should fail", rating);
        }

        for rating in 1..=5 {
            let dto = ValidateTicketDto {
                rating,
                comment: Some("Bon travail".to_string()),
            };
            assert!(dto.validate().is_ok());
        }
    }

    #[test]
    fn test_upload_media_requires_payload() {
        let dto = UploadMediaDto {
            data: "".to_string(),
            label: "photo_1.jpg".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
