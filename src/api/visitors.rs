//! Visitor check-in and security logs.
//!
//! Security personnel log entries; a log row stays open until the
//! visitor is checked out.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// One row of the security desk's log. `visitor` is the backend id of
/// the visitor record.
#[derive(Debug, Deserialize)]
pub struct SecurityLog {
    pub id: i64,
    pub visitor: i64,
    pub entry_time: String,
    #[serde(default)]
    pub exit_time: Option<String>,
    pub guard_name: String,
}

#[derive(Debug, Serialize)]
struct VisitorEntry<'a> {
    name: &'a str,
    phone_number: &'a str,
    vehicle_number: Option<&'a str>,
    resident_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EntryResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub exit_time: String,
}

impl ApiClient {
    /// Newest entries first.
    pub async fn security_logs(&self) -> Result<Vec<SecurityLog>, ApiError> {
        self.get_json("security-logs/").await
    }

    /// Log a visitor entry against the resident being visited.
    /// Security role only; the backend records the guard's username.
    pub async fn log_visitor_entry(
        &self,
        name: &str,
        phone_number: &str,
        resident_id: i64,
        vehicle_number: Option<&str>,
    ) -> Result<EntryResponse, ApiError> {
        self.post_json(
            "visitors/",
            &VisitorEntry {
                name,
                phone_number,
                vehicle_number,
                resident_id,
            },
        )
        .await
    }

    /// Stamp the exit time on an open log row. The backend rejects a
    /// second checkout with a 400.
    pub async fn checkout_visitor(&self, log_id: i64) -> Result<CheckoutResponse, ApiError> {
        self.patch_empty(&format!("security-logs/{}/checkout/", log_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_has_no_exit_time() {
        let logs: Vec<SecurityLog> = serde_json::from_str(
            r#"[{
                "id": 9,
                "visitor": 31,
                "entry_time": "2025-03-08T14:05:00Z",
                "exit_time": null,
                "guard_name": "gopal"
            }]"#,
        )
        .unwrap();
        assert!(logs[0].exit_time.is_none());
    }

    #[test]
    fn test_entry_body_includes_null_vehicle() {
        let body = serde_json::to_value(VisitorEntry {
            name: "Courier",
            phone_number: "9811111111",
            vehicle_number: None,
            resident_id: 7,
        })
        .unwrap();
        // The original client sends an explicit null when no vehicle
        assert!(body.get("vehicle_number").unwrap().is_null());
        assert_eq!(body["resident_id"], 7);
    }
}
