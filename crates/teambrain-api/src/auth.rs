//! API key authentication.

use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use tracing::debug;

use teambrain_models::{Member, Team};

use crate::error::ApiError;
use crate::state::AppState;

/// The member making a request, resolved from `Authorization: Bearer <api_key>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub member: Member,
}

impl AuthContext {
    /// Fails with 403 unless the caller belongs to `team`.
    pub fn require_member(&self, team: &Team) -> Result<(), ApiError> {
        if team.has_member(&self.member.id) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "not a member of team {}",
                team.id
            )))
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("missing API key".to_string()))?;

        let member = state
            .teams
            .find_member_by_api_key(token)?
            .ok_or_else(|| ApiError::Unauthorized("invalid API key".to_string()))?;

        debug!(member_id = %member.id, "Authenticated request");
        Ok(Self { member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts(Some("Bearer tb_abc"))), Some("tb_abc"));
        assert_eq!(bearer_token(&parts(Some("bearer  tb_abc "))), Some("tb_abc"));
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }

    #[test]
    fn test_require_member() {
        let alice = Member::new("Alice", "");
        let bob = Member::new("Bob", "");
        let team = Team::new("Core", alice.id.clone());

        assert!(AuthContext { member: alice }.require_member(&team).is_ok());
        let err = AuthContext { member: bob }.require_member(&team).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
