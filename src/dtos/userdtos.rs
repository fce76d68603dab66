use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{ticketmodel::TicketCategory, usermodel::User};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "First name is required"))]
    pub prenom: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub nom: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(custom = "validate_telephone")]
    pub telephone: Option<String>,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

/// Admin-provisioned artisan account. Password is optional; a generated one
/// is returned once in the creation response.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateArtisanDto {
    #[validate(length(min = 1, message = "First name is required"))]
    pub prenom: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub nom: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(custom = "validate_telephone")]
    pub telephone: Option<String>,

    pub specialite: Option<TicketCategory>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "First name is required"))]
    pub prenom: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub nom: String,

    #[validate(custom = "validate_telephone")]
    pub telephone: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct FcmTokenDto {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveDto {
    pub is_active: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArtisanQueryDto {
    pub specialite: Option<TicketCategory>,
}

pub fn validate_telephone(telephone: &str) -> Result<(), ValidationError> {
    let phone_regex = regex::Regex::new(r"^\+?[0-9][0-9 \-]{7,19}$")
        .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

    if !phone_regex.is_match(telephone) {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::from(
            "Phone number must be in a valid format (e.g., +221771234567)",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub prenom: String,
    pub nom: String,
    pub email: String,
    pub role: String,
    pub telephone: Option<String>,
    pub specialite: Option<String>,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            prenom: user.prenom.to_owned(),
            nom: user.nom.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            telephone: user.telephone.clone(),
            specialite: user.specialite.map(|s| s.to_str().to_string()),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<Self> {
        users.iter().map(Self::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_matching_passwords() {
        let dto = RegisterUserDto {
            prenom: "Awa".to_string(),
            nom: "Diallo".to_string(),
            email: "awa@fixliya.test".to_string(),
            telephone: None,
            password: "secret123".to_string(),
            password_confirm: "different".to_string(),
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password_confirm"));
    }

    #[test]
    fn test_register_valid() {
        let dto = RegisterUserDto {
            prenom: "Awa".to_string(),
            nom: "Diallo".to_string(),
            email: "awa@fixliya.test".to_string(),
            telephone: Some("+221771234567".to_string()),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
        };

        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_telephone_format() {
        assert!(validate_telephone("+221771234567").is_ok());
        assert!(validate_telephone("77 123 45 67").is_ok());
        assert!(validate_telephone("771-234-567").is_ok());

        assert!(validate_telephone("not a phone").is_err());
        assert!(validate_telephone("+").is_err());
        assert!(validate_telephone("12").is_err());
    }

    #[test]
    fn test_create_artisan_password_optional() {
        let dto = CreateArtisanDto {
            prenom: "Ibrahima".to_string(),
            nom: "Sow".to_string(),
            email: "ibrahima@fixliya.test".to_string(),
            telephone: None,
            specialite: Some(TicketCategory::Plumbing),
            password: None,
        };
        assert!(dto.validate().is_ok());

        let with_short_password = CreateArtisanDto {
            password: Some("abc".to_string()),
            ..dto
        };
        assert!(with_short_password.validate().is_err());
    }

    #[test]
    fn test_filter_user_hides_password() {
        let json = serde_json::to_string(&FilterUserDto {
            id: Uuid::new_v4().to_string(),
            prenom: "Awa".to_string(),
            nom: "Diallo".to_string(),
            email: "awa@fixliya.test".to_string(),
            role: "student".to_string(),
            telephone: None,
            specialite: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();

        assert!(!json.contains("password"));
        assert!(json.contains("createdAt"));
    }
}
