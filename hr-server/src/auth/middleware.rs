//! Authentication middleware
//!
//! [`require_auth`] runs on every request; [`require_capability`] is layered
//! onto the route groups that need more than a signed-in user.

use std::future::Future;
use std::pin::Pin;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::policy::Capability;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

/// Paths reachable without a token
const PUBLIC_ROUTES: &[&str] = &[
    "/api/health",
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/password-reset/request",
    "/api/auth/password-reset/confirm",
];

fn is_public(path: &str) -> bool {
    !path.starts_with("/api/") || PUBLIC_ROUTES.contains(&path)
}

/// Require a valid bearer token that resolves to an active user
///
/// Skipped for `OPTIONS`, non-API paths and [`PUBLIC_ROUTES`].
///
/// | Failure | Response |
/// |---------|----------|
/// | No `Authorization` header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Bad signature / malformed | 401 TokenInvalid |
/// | `sub` no longer exists | 401 UserNotFound |
/// | Account deactivated | 403 AccountDisabled |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS || is_public(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = match req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().path().to_string());
            return Err(AppError::unauthorized());
        }
    };

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().path().to_string()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let user = UserRepository::new(state.get_db())
        .find_by_id(&claims.sub)
        .await?
        .ok_or_else(|| {
            security_log!("WARN", "auth_unknown_subject", user_id = claims.sub.clone());
            AppError::new(ErrorCode::UserNotFound)
        })?;

    if !user.is_active {
        security_log!("WARN", "auth_disabled_account", user_id = user.id.clone());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    req.extensions_mut().insert(CurrentUser::from(&user));
    Ok(next.run(req).await)
}

/// Require the caller's role to hold `capability`
///
/// ```ignore
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_capability(Capability::ManageOrganization)));
/// ```
pub fn require_capability(
    capability: Capability,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>> + Clone
{
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::unauthorized)?;

            if !user.can(capability) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    role = user.role.as_str(),
                    capability = capability.name()
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    capability.name()
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public("/api/health"));
        assert!(is_public("/api/auth/login"));
        assert!(is_public("/api/auth/password-reset/confirm"));
        assert!(is_public("/favicon.ico"));
        assert!(!is_public("/api/auth/me"));
        assert!(!is_public("/api/employees"));
    }
}
