use chrono::{DateTime, Utc};
use dt_core::domain::entities::{RefreshTokenStatus, SessionSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One refresh token as shown in the session listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub status: RefreshTokenStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<SessionSummary> for SessionResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.id,
            status: summary.status,
            created_at: summary.created_at,
            expires_at: summary.expires_at,
            last_used_at: summary.last_used_at,
        }
    }
}
