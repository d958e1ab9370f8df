use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::Role;

/// Body of POST /auth/login. The identifier matches either username or
/// email on the backend.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub identifier: String,
    pub password: String,
}

/// The backend's authentication payload. First and last name are optional
/// on the wire; the session store persists them as empty strings when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub jwt: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Body of POST /auth/register, also reused by the admin-create endpoint
/// (which is the only caller that sets `role`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl RegisterRequest {
    /// Client-side checks performed before anything is sent: every field is
    /// required and the confirmation must match the password.
    pub fn validate(&self, confirm_password: &str) -> Result<(), ApiError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ApiError::Validation(format!("{label} is required")));
            }
        }
        if self.password != confirm_password {
            return Err(ApiError::Validation("passwords do not match".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw123".to_string(),
            role: None,
        }
    }

    #[test]
    fn catches_mismatch_and_missing_fields() {
        assert!(request().validate("pw123").is_ok());
        assert!(matches!(
            request().validate("pw124"),
            Err(ApiError::Validation(m)) if m.contains("match")
        ));

        let mut missing = request();
        missing.email = String::new();
        assert!(matches!(
            missing.validate("pw123"),
            Err(ApiError::Validation(m)) if m.contains("email")
        ));
    }

    #[test]
    fn auth_response_tolerates_missing_names() {
        let auth: AuthResponse = serde_json::from_str(
            r#"{"jwt":"t1","userId":1,"username":"admin","email":"a@x.com","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(auth.role, Role::Admin);
        assert_eq!(auth.first_name, None);
    }
}
