//! CSV report downloads.

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch a CSV report. The backend answers unknown types with a
    /// CSV error row rather than a status code, so callers are
    /// expected to restrict the type at their own boundary.
    pub async fn report_csv(&self, report_type: &str) -> Result<String, ApiError> {
        self.get_text(&format!("reports/{}/", report_type)).await
    }
}
