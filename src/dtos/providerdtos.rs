use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{providermodel::ExternalProvider, ticketmodel::TicketCategory};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateProviderDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(custom = "crate::dtos::userdtos::validate_telephone")]
    pub telephone: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    pub specialite: Option<TicketCategory>,
}

#[derive(Debug, Serialize)]
pub struct ProviderData {
    pub provider: ExternalProvider,
}

#[derive(Debug, Serialize)]
pub struct ProviderResponseDto {
    pub status: String,
    pub data: ProviderData,
}

#[derive(Debug, Serialize)]
pub struct ProviderListResponseDto {
    pub status: String,
    pub providers: Vec<ExternalProvider>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_minimal() {
        let dto = CreateProviderDto {
            name: "SenElec Services".to_string(),
            telephone: None,
            email: None,
            specialite: Some(TicketCategory::Electrical),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_provider_rejects_bad_contact() {
        let dto = CreateProviderDto {
            name: "SenElec Services".to_string(),
            telephone: Some("pas un numero".to_string()),
            email: Some("not-an-email".to_string()),
            specialite: None,
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("telephone"));
        assert!(fields.contains_key("email"));
    }
}
