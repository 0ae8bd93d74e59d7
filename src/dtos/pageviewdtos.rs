use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::pageviewmodel::VisitorId;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TrackViewDto {
    #[validate(length(min = 1, max = 500, message = "Path is required"))]
    pub path: String,

    /// Client-persisted random token for anonymous visitors.
    pub anonymous_id: Option<String>,

    /// Set when the visitor has an authenticated session; wins over the
    /// anonymous token.
    pub user_id: Option<Uuid>,
}

impl TrackViewDto {
    /// Resolve the visitor identity. When the client could not supply any
    /// identity (e.g. local storage disabled) a fresh ephemeral token is
    /// minted so the view still counts once for this request.
    pub fn visitor(&self) -> VisitorId {
        if let Some(user_id) = self.user_id {
            return VisitorId::User(user_id);
        }
        match self.anonymous_id.as_deref() {
            Some(token) if !token.trim().is_empty() => {
                VisitorId::Anonymous(token.to_string())
            }
            _ => VisitorId::Anonymous(Uuid::new_v4().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_identity_wins_over_anonymous_token() {
        let user_id = Uuid::new_v4();
        let dto = TrackViewDto {
            path: "/casas".to_string(),
            anonymous_id: Some("token-abc".to_string()),
            user_id: Some(user_id),
        };
        assert_eq!(dto.visitor(), VisitorId::User(user_id));
    }

    #[test]
    fn anonymous_token_is_used_when_no_session() {
        let dto = TrackViewDto {
            path: "/casas".to_string(),
            anonymous_id: Some("token-abc".to_string()),
            user_id: None,
        };
        assert_eq!(
            dto.visitor(),
            VisitorId::Anonymous("token-abc".to_string())
        );
    }

    #[test]
    fn missing_identity_falls_back_to_an_ephemeral_token() {
        let dto = TrackViewDto {
            path: "/casas".to_string(),
            anonymous_id: Some("   ".to_string()),
            user_id: None,
        };
        match dto.visitor() {
            VisitorId::Anonymous(token) => {
                assert!(Uuid::parse_str(&token).is_ok());
            }
            other => panic!("unexpected visitor: {other:?}"),
        }
    }
}
