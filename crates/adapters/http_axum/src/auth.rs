//! Bearer-credential extraction.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use hotelhub_app::ports::PrincipalResolver;
use hotelhub_domain::error::AuthError;
use hotelhub_domain::principal::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of a request.
///
/// Extracting it fails with `401 Unauthorized` when the `Authorization`
/// header is missing, is not a bearer credential, or the resolver rejects
/// the token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPrincipal(pub Principal);

impl<RR, BR, DR, DA, PR> FromRequestParts<AppState<RR, BR, DR, DA, PR>> for CurrentPrincipal
where
    RR: Send + Sync + 'static,
    BR: Send + Sync + 'static,
    DR: Send + Sync + 'static,
    DA: Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<RR, BR, DR, DA, PR>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let principal = state.principals.resolve(token).await?;
        Ok(Self(principal))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredential)?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::InvalidCredential)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidCredential);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn should_extract_bearer_token() {
        let parts = parts_with(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");

        let parts = parts_with(Some("bearer abc123"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");
    }

    #[test]
    fn should_report_missing_header() {
        let parts = parts_with(None);
        assert_eq!(bearer_token(&parts), Err(AuthError::MissingCredential));
    }

    #[test]
    fn should_reject_other_schemes() {
        let parts = parts_with(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), Err(AuthError::InvalidCredential));

        let parts = parts_with(Some("Bearer"));
        assert_eq!(bearer_token(&parts), Err(AuthError::InvalidCredential));
    }
}
