//! Resident administration (admin only).

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::nav::Role;

#[derive(Debug, Deserialize)]
pub struct Resident {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub apartment_no: String,
    pub phone_number: String,
    pub role: Role,
    /// active or inactive
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial resident update, PATCHed to `residents/{id}/`.
#[derive(Debug, Default, Serialize)]
pub struct ResidentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ResidentUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.apartment_no.is_none()
            && self.phone_number.is_none()
            && self.status.is_none()
    }
}

impl ApiClient {
    pub async fn residents(&self) -> Result<Vec<Resident>, ApiError> {
        self.get_json("residents/").await
    }

    pub async fn update_resident(
        &self,
        id: i64,
        update: &ResidentUpdate,
    ) -> Result<Resident, ApiError> {
        self.patch_json(&format!("residents/{}/", id), update).await
    }

    pub async fn remove_resident(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("residents/{}/", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resident_parses() {
        let resident: Resident = serde_json::from_str(
            r#"{
                "id": 7,
                "username": "asha",
                "email": "asha@example.com",
                "apartment_no": "B-204",
                "phone_number": "9800000000",
                "role": "resident",
                "status": "active"
            }"#,
        )
        .unwrap();
        assert_eq!(resident.role, Role::Resident);
        assert_eq!(resident.status.as_deref(), Some("active"));
    }

    #[test]
    fn test_update_body_is_partial() {
        let update = ResidentUpdate {
            status: Some("inactive".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert_eq!(body["status"], "inactive");
    }
}
