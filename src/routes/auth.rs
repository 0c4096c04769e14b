//! Account routes: email/password sign-up and sign-in, session management.
//!
//! Sessions ride in the `session_token` HttpOnly cookie. Non-browser clients
//! (the CLI) send the same token as `Authorization: Bearer`.

use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::poem::User;
use crate::services::auth::{self as auth_svc, AuthError, SignedIn};
use crate::services::session;
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user resolved from the session cookie or bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(COOKIE_NAME)
            .map(Cookie::value)
            .filter(|t| !t.is_empty())
            .or_else(|| bearer_token(&parts.headers))
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_owned();

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(app_state.accounts.as_ref(), &token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidEmail | AuthError::WeakPassword => StatusCode::BAD_REQUEST,
        AuthError::EmailTaken => StatusCode::CONFLICT,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(30))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn signed_in_response(signed_in: SignedIn, status: StatusCode, secure: bool) -> impl IntoResponse {
    let jar = CookieJar::new().add(session_cookie(signed_in.token.clone(), secure));
    (status, jar, Json(signed_in))
}

fn reject(err: &AuthError) -> StatusCode {
    let status = auth_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "auth request failed");
    }
    status
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signup`: create an account and start a session.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, StatusCode> {
    let signed_in = auth_svc::sign_up(state.accounts.as_ref(), &body.email, &body.password)
        .await
        .map_err(|e| reject(&e))?;
    Ok(signed_in_response(signed_in, StatusCode::CREATED, state.config.cookie_secure))
}

/// `POST /api/auth/login`: verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, StatusCode> {
    let signed_in = auth_svc::sign_in(state.accounts.as_ref(), &body.email, &body.password)
        .await
        .map_err(|e| reject(&e))?;
    Ok(signed_in_response(signed_in, StatusCode::OK, state.config.cookie_secure))
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(state.accounts.as_ref(), &auth.token).await {
        tracing::warn!(error = %e, user_id = %auth.user.id, "session delete failed");
    }
    let jar = CookieJar::new().add(cleared_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
