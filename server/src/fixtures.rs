//! Static JSON fixtures compiled into the binary.

use serde::Deserialize;
use types::{
    Result, UserRecord, dashboard::DashboardData, err, reporting::ReportingData,
};

const DOMAIN_USERS: &str = include_str!("../data/domain_users.json");
const DASHBOARD: &str = include_str!("../data/dashboard.json");
const REPORTING: &str = include_str!("../data/reporting.json");
const DOMAINS: &str = include_str!("../data/domains.json");

#[derive(Deserialize)]
struct DomainUsers {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Deserialize)]
struct Domains {
    domains: Vec<String>,
}

/// The built-in accounts. A broken fixture yields no accounts.
pub fn domain_users() -> Vec<UserRecord> {
    match serde_json::from_str::<DomainUsers>(DOMAIN_USERS) {
        Ok(fixture) => fixture.users,
        Err(error) => {
            tracing::error!(?error, "failed to parse domain users fixture");
            Vec::new()
        }
    }
}

pub fn dashboard() -> Result<DashboardData> {
    serde_json::from_str(DASHBOARD).map_err(|e| err!("failed to parse dashboard fixture: {e}"))
}

pub fn reporting() -> Result<ReportingData> {
    serde_json::from_str(REPORTING).map_err(|e| err!("failed to parse reporting fixture: {e}"))
}

/// Domains an admin can grant to a user.
pub fn domains() -> Result<Vec<String>> {
    let fixture: Domains =
        serde_json::from_str(DOMAINS).map_err(|e| err!("failed to parse domains fixture: {e}"))?;
    Ok(fixture.domains)
}
