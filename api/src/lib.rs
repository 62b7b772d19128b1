use dioxus::prelude::*;
use types::{
    CurrentUser, Role, UserSummary, dashboard::DashboardData, reporting::ReportingData,
};

#[cfg_attr(not(feature = "server"), allow(dead_code))]
fn server_error(code: u16, error: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::ServerError {
        message: error.to_string(),
        code,
        details: None,
    }
}

/// 401 without a valid session, so the client goes back to the login page.
/// 403 when an admin is required and the caller is not one.
#[cfg_attr(not(feature = "server"), allow(dead_code))]
fn authorize(
    session: std::result::Result<CurrentUser, impl std::fmt::Display>,
    admin_only: bool,
) -> ServerFnResult<CurrentUser> {
    let user = session.map_err(|e| server_error(401, e))?;
    if admin_only && !user.is_admin() {
        return Err(server_error(
            403,
            format!("access denied: user '{}' is not an admin", user.username),
        ));
    }
    Ok(user)
}

#[cfg(feature = "server")]
async fn require_session() -> ServerFnResult<CurrentUser> {
    authorize(server::get_session_from_cookie().await, false)
}

#[cfg(feature = "server")]
async fn require_admin() -> ServerFnResult<CurrentUser> {
    authorize(server::get_session_from_cookie().await, true)
}

#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<CurrentUser>> {
    match server::get_session_from_cookie().await {
        Ok(session) => Ok(Some(session)),
        Err(_) => Ok(None),
    }
}

/// Dashboard rows limited to the caller's domains, plus the stat templates.
#[post("/api/dashboard")]
pub async fn dashboard_data() -> ServerFnResult<DashboardData> {
    let user = require_session().await?;
    let data = server::fixtures::dashboard()?;

    Ok(DashboardData {
        table_data: server::scoped_rows(data.table_data, &user),
        stats: data.stats,
    })
}

#[post("/api/reporting")]
pub async fn reporting_data() -> ServerFnResult<ReportingData> {
    let user = require_session().await?;
    let data = server::fixtures::reporting()?;

    Ok(ReportingData {
        summary_cards: data.summary_cards,
        table_data: server::scoped_rows(data.table_data, &user),
    })
}

#[post("/api/users")]
pub async fn list_users() -> ServerFnResult<Vec<UserSummary>> {
    require_admin().await?;
    let users = server::STORE.all_users().await;
    Ok(UserSummary::from_records(&users))
}

#[post("/api/domains")]
pub async fn list_domains() -> ServerFnResult<Vec<String>> {
    require_admin().await?;
    Ok(server::fixtures::domains()?)
}

#[post("/api/users/create")]
pub async fn create_user(
    username: String,
    password: String,
    role: Role,
    domains: Vec<String>,
) -> ServerFnResult<()> {
    require_admin().await?;
    let new_user = types::NewUser {
        username,
        password: password.into(),
        role,
        domains,
    };
    server::STORE
        .add_user(new_user)
        .await
        .map_err(|e| server_error(400, e))?;
    Ok(())
}

#[post("/api/users/role")]
pub async fn update_user_role(username: String, role: Role) -> ServerFnResult<()> {
    require_admin().await?;
    server::STORE.update_role(&username, role).await?;
    Ok(())
}

#[post("/api/users/domains")]
pub async fn update_user_domains(username: String, domains: Vec<String>) -> ServerFnResult<()> {
    require_admin().await?;
    server::STORE
        .set_domains(&username, domains)
        .await
        .map_err(|e| server_error(400, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            username: "publisher@finrezo.com".into(),
            role,
            domains: vec!["finrezo.com".into()],
        }
    }

    fn code(result: ServerFnResult<CurrentUser>) -> Option<u16> {
        match result {
            Err(ServerFnError::ServerError { code, .. }) => Some(code),
            _ => None,
        }
    }

    #[test]
    fn missing_session_is_unauthorized() {
        let missing: std::result::Result<CurrentUser, &str> = Err("session cookie not found");
        assert_eq!(code(authorize(missing, false)), Some(401));

        let missing: std::result::Result<CurrentUser, &str> = Err("session cookie not found");
        assert_eq!(code(authorize(missing, true)), Some(401));
    }

    #[test]
    fn publishers_are_forbidden_from_admin_calls() {
        let publisher: std::result::Result<CurrentUser, &str> = Ok(user(Role::Publisher));
        assert_eq!(code(authorize(publisher, true)), Some(403));

        let publisher: std::result::Result<CurrentUser, &str> = Ok(user(Role::Publisher));
        assert!(authorize(publisher, false).is_ok());

        let admin: std::result::Result<CurrentUser, &str> = Ok(user(Role::Admin));
        assert!(authorize(admin, true).is_ok());
    }
}
