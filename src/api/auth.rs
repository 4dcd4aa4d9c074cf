//! Login, registration, and logout.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::nav::Role;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful login body: `{message, role, token}`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub role: Role,
    pub token: String,
}

/// Registration payload. `role` is chosen at signup and confirmed by
/// the backend on each login.
#[derive(Debug, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone_number: String,
    pub apartment_no: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl ApiClient {
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        self.post_public("login/", &LoginRequest { username, password })
            .await
    }

    pub async fn register(&self, account: &NewAccount) -> Result<MessageResponse, ApiError> {
        self.post_public("register/", account).await
    }

    /// Invalidate the token server-side. The local session is cleared
    /// by the caller regardless of whether this succeeds.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.post_json("logout/", &serde_json::json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parses_role_variants() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"message": "Login successful", "role": "admin", "token": "9f2c"}"#,
        )
        .unwrap();
        assert_eq!(resp.role, Role::Admin);
        assert_eq!(resp.token, "9f2c");

        // A role label this client does not know must still log in
        let resp: LoginResponse =
            serde_json::from_str(r#"{"role": "caretaker", "token": "aa"}"#).unwrap();
        assert_eq!(resp.role, Role::Unknown);
        assert!(resp.message.is_none());
    }

    #[test]
    fn test_new_account_omits_empty_email() {
        let account = NewAccount {
            username: "asha".into(),
            password: "secret".into(),
            email: None,
            phone_number: "9800000000".into(),
            apartment_no: "B-204".into(),
            role: Role::Resident,
        };
        let body = serde_json::to_value(&account).unwrap();
        assert!(body.get("email").is_none());
        assert_eq!(body["role"], "resident");
        assert_eq!(body["apartment_no"], "B-204");
    }
}
