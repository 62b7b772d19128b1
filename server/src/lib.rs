mod auth_routes;
mod config;
pub mod fixtures;
mod session;
pub mod store;

use axum::Router;
use axum::http::HeaderMap;
use dioxus::fullstack::FullstackContext;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;
use types::{
    CurrentUser, Result, SESSION_COOKIE_NAME, SiteRow, err, filter_by_user_domains,
};

pub use crate::config::{CONFIG, Config};
pub use crate::session::{session_cookie_value, sign_session, verify_session};
pub use crate::store::STORE;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Validate configuration and build the non-Dioxus routes.
pub async fn init() -> Result<Router> {
    Config::load()?;
    tracing::info!(data_dir = %CONFIG.data_dir.display(), "starting");

    Ok(auth_routes::auth_router())
}

/// Extract the user session from the request cookie.
pub async fn get_session_from_cookie() -> Result<CurrentUser> {
    let headers: HeaderMap = FullstackContext::extract()
        .await
        .map_err(|e| err!("failed to read request headers: {e}"))?;

    session_from_headers(&headers, &CONFIG.session_secret)
}

/// Verify the signed session cookie carried in `headers`.
pub fn session_from_headers(headers: &HeaderMap, secret: &SecretString) -> Result<CurrentUser> {
    let cookie_header = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| err!("no cookies in request"))?;

    let token = session_cookie_value(cookie_header, SESSION_COOKIE_NAME)
        .ok_or_else(|| err!("session cookie not found"))?;

    verify_session(token, secret)
}

/// Scope fixture rows to what the signed-in user may see.
pub fn scoped_rows<R: SiteRow>(rows: Vec<R>, user: &CurrentUser) -> Vec<R> {
    let total = rows.len();
    let visible = filter_by_user_domains(rows, Some(user));
    tracing::debug!(username = %user.username, total, visible = visible.len(), "scoped rows");
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};
    use types::Role;

    fn secret() -> SecretString {
        "test-secret".to_string().into()
    }

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn session_comes_from_cookie_header() {
        let user = CurrentUser {
            username: "admin@gmail.com".into(),
            role: Role::Admin,
            domains: Vec::new(),
        };
        let token = sign_session(&user, &secret()).unwrap();
        let cookie = format!("theme=dark; {SESSION_COOKIE_NAME}={token}");

        assert_eq!(session_from_headers(&headers(&cookie), &secret()).unwrap(), user);
    }

    #[test]
    fn missing_or_forged_cookie_is_rejected() {
        assert!(session_from_headers(&HeaderMap::new(), &secret()).is_err());
        assert!(session_from_headers(&headers("theme=dark"), &secret()).is_err());
        let forged = format!("{SESSION_COOKIE_NAME}=e30.c2ln");
        assert!(session_from_headers(&headers(&forged), &secret()).is_err());
    }
}
