use async_trait::async_trait;

use crate::{
    db::db::DBClient,
    dtos::leaddtos::CreateLeadDto,
    models::leadmodel::Lead,
};

#[async_trait]
pub trait LeadExt {
    /// Persist one inquiry. A single insert, never retried here; the
    /// caller decides how to surface a failure.
    async fn create_lead(&self, data: CreateLeadDto) -> Result<Lead, sqlx::Error>;
}

#[async_trait]
impl LeadExt for DBClient {
    async fn create_lead(&self, data: CreateLeadDto) -> Result<Lead, sqlx::Error> {
        let lead = sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (inquiry_type, name, email, phone, message, origin_slug) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, inquiry_type, name, email, phone, message, origin_slug, created_at",
        )
        .bind(data.inquiry_type)
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.message)
        .bind(data.origin_slug.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }
}
