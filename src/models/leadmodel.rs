use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "inquiry_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryType {
    #[default]
    Information,
    Buy,
    Sell,
}

/// An inbound contact inquiry. Append-only: created by form submission,
/// never mutated or deleted by this service.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Lead {
    pub id: i64,
    pub inquiry_type: InquiryType,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// Slug of the listing the inquiry came from; empty for the generic
    /// contact form.
    pub origin_slug: String,
    pub created_at: Option<DateTime<Utc>>,
}
