use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded page visit. At most one row exists per
/// (path, visitor identity) within a 5-minute window; the schema carries a
/// unique index as the backstop for the application-level check.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PageView {
    pub id: i64,
    pub path: String,
    pub user_id: Option<Uuid>,
    pub anonymous_id: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Who is looking at the page: an authenticated user when a session
/// exists, otherwise the client's persisted anonymous token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitorId {
    User(Uuid),
    Anonymous(String),
}

impl VisitorId {
    /// Canonical key used for dedup matching; mirrors the
    /// `coalesce(user_id::text, anonymous_id)` expression in the schema's
    /// unique index.
    pub fn key(&self) -> String {
        match self {
            VisitorId::User(id) => id.to_string(),
            VisitorId::Anonymous(token) => token.clone(),
        }
    }
}
