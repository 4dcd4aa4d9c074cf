//! Notice board. Anyone authenticated may read; only admins post.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    /// Username of the posting admin.
    #[serde(default)]
    pub posted_by: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewNotice<'a> {
    title: &'a str,
    content: &'a str,
}

impl ApiClient {
    /// Newest first, as the backend orders them.
    pub async fn notices(&self) -> Result<Vec<Notice>, ApiError> {
        self.get_json("notices/").await
    }

    pub async fn post_notice(&self, title: &str, content: &str) -> Result<Notice, ApiError> {
        self.post_json("notices/", &NewNotice { title, content })
            .await
    }
}
