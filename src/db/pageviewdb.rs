use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    db::db::DBClient,
    models::pageviewmodel::{PageView, VisitorId},
};

/// Dedup window: a visitor counts at most once per path per 5 minutes.
pub fn view_dedup_window() -> Duration {
    Duration::minutes(5)
}

/// Postgres unique-violation SQLSTATE. A concurrent insert for the same
/// (path, visitor, window) key loses with this code and that loss is
/// success-equivalent, not a fault.
const UNIQUE_VIOLATION: &str = "23505";

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
pub trait PageViewExt {
    async fn find_recent_view(
        &self,
        path: &str,
        visitor: &VisitorId,
        since: DateTime<Utc>,
    ) -> Result<Option<PageView>, sqlx::Error>;

    async fn insert_view(
        &self,
        path: &str,
        visitor: &VisitorId,
        user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error>;

    /// Record a visit at most once per (path, visitor) per 5-minute
    /// window. Best-effort and infallible from the caller's point of
    /// view: every failure mode ends here, logged at most.
    async fn record_page_view(&self, path: &str, visitor: &VisitorId, user_agent: Option<&str>);
}

#[async_trait]
impl PageViewExt for DBClient {
    async fn find_recent_view(
        &self,
        path: &str,
        visitor: &VisitorId,
        since: DateTime<Utc>,
    ) -> Result<Option<PageView>, sqlx::Error> {
        let view = sqlx::query_as::<_, PageView>(
            "SELECT id, path, user_id, anonymous_id, user_agent, created_at \
             FROM page_views \
             WHERE path = $1 \
             AND COALESCE(user_id::text, anonymous_id) = $2 \
             AND created_at >= $3 \
             LIMIT 1",
        )
        .bind(path)
        .bind(visitor.key())
        .bind(since)
        .fetch_optional(&self.pool)
        .await?;

        Ok(view)
    }

    async fn insert_view(
        &self,
        path: &str,
        visitor: &VisitorId,
        user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let (user_id, anonymous_id) = match visitor {
            VisitorId::User(id) => (Some(*id), None),
            VisitorId::Anonymous(token) => (None, Some(token.as_str())),
        };

        sqlx::query(
            "INSERT INTO page_views (path, user_id, anonymous_id, user_agent) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(path)
        .bind(user_id)
        .bind(anonymous_id)
        .bind(user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_page_view(&self, path: &str, visitor: &VisitorId, user_agent: Option<&str>) {
        let window_start = Utc::now() - view_dedup_window();

        // The existence check is an optimization to skip pointless
        // writes; the unique index is the authoritative guard. If the
        // check itself fails we stop rather than risk a double count.
        match self.find_recent_view(path, visitor, window_start).await {
            Ok(Some(_)) => return,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("page view existence check failed for {path}: {err}");
                return;
            }
        }

        if let Err(err) = self.insert_view(path, visitor, user_agent).await {
            if !is_unique_violation(&err) {
                tracing::warn!("page view insert failed for {path}: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_database_unique_violations_are_swallowed() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }

    #[test]
    fn dedup_window_is_five_minutes() {
        assert_eq!(view_dedup_window(), Duration::minutes(5));
    }
}
