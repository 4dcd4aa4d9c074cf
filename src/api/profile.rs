//! Profile read and update.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::nav::Role;

/// The authenticated user's profile. Fetched per command, never
/// cached; the server is the sole source of truth.
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    pub apartment_no: String,
    pub phone_number: String,
}

/// Partial profile update. Only the set fields are sent.
#[derive(Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub async fn user_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("user-profile/").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UpdateResponse, ApiError> {
        self.patch_json("update-profile/", update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parses_backend_shape() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "id": 7,
                "username": "asha",
                "first_name": "Asha",
                "last_name": "Verma",
                "email": "asha@example.com",
                "role": "resident",
                "apartment_no": "B-204",
                "phone_number": "9800000000"
            }"#,
        )
        .unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.role, Role::Resident);
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ProfileUpdate {
            email: Some("new@example.com".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        let body = serde_json::to_value(&update).unwrap();
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["email"], "new@example.com");

        assert!(ProfileUpdate::default().is_empty());
    }
}
