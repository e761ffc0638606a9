use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::envelope::ApiError;
use crate::accounts::AccountId;

/// Header the session layer stamps with the authenticated account id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Authenticated account id taken from [`ACTOR_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorId(pub AccountId);

#[async_trait]
impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        Ok(ActorId(AccountId(raw.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<ActorId, ApiError> {
        let (mut parts, _) = request.into_parts();
        ActorId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_trimmed_header_value() {
        let request = Request::builder()
            .header(ACTOR_HEADER, " user-000001 ")
            .body(())
            .expect("request builds");
        let actor = extract(request).await.expect("actor present");
        assert_eq!(actor.0 .0, "user-000001");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let request = Request::builder().body(()).expect("request builds");
        assert!(matches!(
            extract(request).await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
