use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{Role, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public-safe projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            created_at: u.created_at,
        }
    }
}

/// Wire shape of [`PublicUser`]: the display name is split back on its
/// first space.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&PublicUser> for UserResponse {
    fn from(u: &PublicUser) -> Self {
        let (first_name, last_name) = split_name(&u.name);
        Self {
            id: u.id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: u.email.clone(),
            created_at: u.created_at,
        }
    }
}

pub fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim())
}

pub fn split_name(name: &str) -> (&str, &str) {
    name.split_once(' ').unwrap_or((name, ""))
}

/// Payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: UserResponse,
}

/// Detail view returned by the user lookup endpoint.
#[derive(Debug, Serialize)]
pub struct UserDetails {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for UserDetails {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Envelope around every response body, success or failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_projection() {
        let name = join_name("Ada", "Lovelace");
        assert_eq!(name, "Ada Lovelace");
        let public = PublicUser {
            id: Uuid::new_v4(),
            name,
            email: "ada@x.com".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let wire = UserResponse::from(&public);
        assert_eq!(wire.first_name, "Ada");
        assert_eq!(wire.last_name, "Lovelace");
    }

    #[test]
    fn join_trims_each_part() {
        assert_eq!(join_name("  Jane ", " Doe  "), "Jane Doe");
    }

    #[test]
    fn split_keeps_everything_after_first_space_as_last_name() {
        assert_eq!(split_name("Mary Ann Smith"), ("Mary", "Ann Smith"));
        assert_eq!(split_name("Cher"), ("Cher", ""));
    }

    #[test]
    fn register_request_reads_camel_case_fields() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw","firstName":"Jane","lastName":"Doe"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Jane");
        assert_eq!(req.last_name, "Doe");
    }

    #[test]
    fn envelope_serializes_status_code_and_null_data() {
        let json = serde_json::to_value(ApiResponse::error(401, "Invalid email or password")).unwrap();
        assert_eq!(json["statusCode"], 401);
        assert_eq!(json["message"], "Invalid email or password");
        assert!(json["data"].is_null());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn user_response_has_snake_case_fields_and_no_hash() {
        let public = PublicUser {
            id: Uuid::new_v4(),
            name: "Jane Doe".into(),
            email: "a@x.com".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(UserResponse::from(&public)).unwrap();
        assert_eq!(json["first_name"], "Jane");
        assert_eq!(json["last_name"], "Doe");
        assert!(json["created_at"].is_string());
        assert!(json.get("password_hash").is_none());
    }
}
