//! Request/response types for the announcements API.
//!
//! These payloads are shared between handlers and `OpenAPI` generation.

use serde::Serialize;
use utoipa::ToSchema;

use super::storage::Announcement;

/// Full create shape: every field is required.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CreateAnnouncement {
    pub header: String,
    pub description: String,
    pub owner: String,
}

/// Partial update shape: absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct PatchAnnouncement {
    pub header: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
}

impl PatchAnnouncement {
    /// Writes every present, non-empty field into its own column of `record`.
    pub fn apply_to(self, record: &mut Announcement) {
        if let Some(header) = non_empty(self.header) {
            record.header = header;
        }
        if let Some(description) = non_empty(self.description) {
            record.description = Some(description);
        }
        if let Some(owner) = non_empty(self.owner) {
            record.owner = Some(owner);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnnouncementResponse {
    pub header: String,
    pub description: Option<String>,
    /// ISO-8601 timestamp assigned by the database on insert.
    pub created_at: String,
    pub owner: Option<String>,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(record: Announcement) -> Self {
        Self {
            header: record.header,
            description: record.description,
            created_at: record.created_at,
            owner: record.owner,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedAnnouncement {
    pub id: i32,
    pub header: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub created_at: String,
}

impl From<Announcement> for CreatedAnnouncement {
    fn from(record: Announcement) -> Self {
        Self {
            id: record.id,
            header: record.header,
            description: record.description,
            owner: record.owner,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
