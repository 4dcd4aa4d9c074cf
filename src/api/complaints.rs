//! Complaints: residents file them, admins move them through
//! open / in_progress / resolved.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Present when the serializer includes the filer's username.
    #[serde(default)]
    pub resident_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewComplaint<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusPatch<'a> {
    status: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

impl ApiClient {
    /// List complaints. The backend scopes the result by role: admins
    /// see everything, residents only their own filings.
    pub async fn complaints(&self) -> Result<Vec<Complaint>, ApiError> {
        self.get_json("complaints/").await
    }

    pub async fn create_complaint(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Complaint, ApiError> {
        self.post_json("complaints/", &NewComplaint { title, description })
            .await
    }

    /// Admin action. `status` must be one of open, in_progress,
    /// resolved; the backend rejects anything else with a 400.
    pub async fn update_complaint_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<StatusResponse, ApiError> {
        self.patch_json(
            &format!("complaints/{}/update_status/", id),
            &StatusPatch { status },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complaint_list_parses() {
        let complaints: Vec<Complaint> = serde_json::from_str(
            r#"[{
                "id": 1,
                "title": "Lift out of order",
                "description": "Tower B lift stuck on 4th floor",
                "status": "open",
                "created_at": "2025-03-01T09:12:00Z",
                "updated_at": "2025-03-01T09:12:00Z",
                "resident_name": "asha"
            }]"#,
        )
        .unwrap();
        assert_eq!(complaints[0].status, "open");
        assert_eq!(complaints[0].resident_name.as_deref(), Some("asha"));
    }

    #[test]
    fn test_status_patch_body() {
        let body = serde_json::to_value(StatusPatch {
            status: "in_progress",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"status": "in_progress"}));
    }
}
