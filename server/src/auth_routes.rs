use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use cookie::{Cookie, SameSite};
use secrecy::SecretString;
use serde::Deserialize;
use types::{CurrentUser, INVALID_CREDENTIALS, SESSION_COOKIE_NAME};

use crate::{
    CONFIG,
    session::sign_session,
    store::{STORE, UserStore},
};

/// What the login and logout handlers need from the running server.
#[derive(Clone)]
struct AuthState {
    store: Arc<UserStore>,
    session_secret: SecretString,
    secure_cookies: bool,
}

pub fn auth_router() -> Router {
    router(AuthState {
        store: STORE.clone(),
        session_secret: CONFIG.session_secret.clone(),
        secure_cookies: CONFIG.secure_cookies,
    })
}

fn router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(
    State(state): State<AuthState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AuthError> {
    let username = form.username.trim();

    let Some(user) = state.store.validate_login(username, &form.password).await else {
        tracing::info!(%username, "rejected login");
        return Ok(Redirect::to(&format!("/login?error={INVALID_CREDENTIALS}")).into_response());
    };

    tracing::info!(username = %user.username, role = %user.role, "login succeeded");
    let cookie = session_cookie(&user, &state)?;

    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Redirect::to("/"),
    )
        .into_response())
}

fn session_cookie(user: &CurrentUser, state: &AuthState) -> Result<Cookie<'static>, AuthError> {
    let token = sign_session(user, &state.session_secret).map_err(|error| {
        tracing::error!(%error, "failed to sign session");
        AuthError::Session
    })?;

    Ok(Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .build())
}

async fn logout(State(state): State<AuthState>) -> impl IntoResponse {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(cookie::time::Duration::ZERO)
        .build();

    (
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Redirect::to("/login"),
    )
}

#[derive(Debug)]
enum AuthError {
    Session,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Session => (StatusCode::INTERNAL_SERVER_ERROR, "Session error"),
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session::verify_session, store::CREATED_USERS_FILE};
    use axum::{
        body::Body,
        http::{
            HeaderMap, Request,
            header::{CONTENT_TYPE, LOCATION},
        },
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn secret() -> SecretString {
        "test-secret".to_string().into()
    }

    fn test_router(dir: &TempDir) -> Router {
        let fixture = serde_json::from_str(
            r#"[{"username": "publisher@finrezo.com", "password": "finrezo123",
                 "role": "Publisher", "domains": ["finrezo.com"]}]"#,
        )
        .unwrap();
        router(AuthState {
            store: Arc::new(UserStore::new(dir.path().join(CREATED_USERS_FILE), fixture)),
            session_secret: secret(),
            secure_cookies: false,
        })
    }

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap()
    }

    fn header<'a>(headers: &'a HeaderMap, name: axum::http::HeaderName) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn login_sets_signed_session_cookie() {
        let dir = TempDir::new().unwrap();
        let response = test_router(&dir)
            .oneshot(login_request("publisher%40finrezo.com", "finrezo123"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(header(response.headers(), LOCATION), Some("/"));

        let cookie = header(response.headers(), SET_COOKIE).unwrap();
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        let token = cookie
            .strip_prefix("addesk_session=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        let session = verify_session(token, &secret()).unwrap();
        assert_eq!(session.username, "publisher@finrezo.com");
        assert_eq!(session.domains, vec!["finrezo.com"]);
    }

    #[tokio::test]
    async fn bad_password_redirects_with_error() {
        let dir = TempDir::new().unwrap();
        let response = test_router(&dir)
            .oneshot(login_request("publisher%40finrezo.com", "wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            header(response.headers(), LOCATION),
            Some("/login?error=invalid")
        );
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn logout_clears_cookie() {
        let dir = TempDir::new().unwrap();
        let request = Request::builder()
            .uri("/auth/logout")
            .body(Body::empty())
            .unwrap();
        let response = test_router(&dir).oneshot(request).await.unwrap();

        assert_eq!(header(response.headers(), LOCATION), Some("/login"));
        let cookie = header(response.headers(), SET_COOKIE).unwrap();
        assert!(cookie.starts_with("addesk_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
