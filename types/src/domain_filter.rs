//! Row scoping by the signed-in user's assigned domains.

use std::collections::HashSet;

use crate::CurrentUser;

/// A data row that belongs to a publisher site.
pub trait SiteRow {
    fn site(&self) -> &str;
}

fn normalize(domain: &str) -> String {
    domain.trim().to_lowercase()
}

/// Keep only the rows the user may see.
///
/// Without a user, for admins, and for users with no assigned domains every
/// row is returned. Otherwise a row is kept when its site, trimmed and
/// compared case-insensitively, is one of the user's domains. Rows with an
/// empty site are never visible to a domain user.
pub fn filter_by_user_domains<R: SiteRow>(rows: Vec<R>, user: Option<&CurrentUser>) -> Vec<R> {
    let Some(user) = user else {
        return rows;
    };
    if user.sees_all_domains() {
        return rows;
    }

    let allowed: HashSet<String> = user.domains.iter().map(|d| normalize(d)).collect();

    rows.into_iter()
        .filter(|row| {
            let site = normalize(row.site());
            !site.is_empty() && allowed.contains(&site)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[derive(Debug, PartialEq)]
    struct Row(&'static str);

    impl SiteRow for Row {
        fn site(&self) -> &str {
            self.0
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row("finrezo.com"),
            Row(" FinRezo.com "),
            Row("newsbay.net"),
            Row(""),
            Row("techpulse.io"),
        ]
    }

    fn user(role: Role, domains: &[&str]) -> CurrentUser {
        CurrentUser {
            username: "someone".into(),
            role,
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn no_user_sees_everything() {
        assert_eq!(filter_by_user_domains(rows(), None).len(), 5);
    }

    #[test]
    fn admin_sees_everything() {
        let admin = user(Role::Admin, &["finrezo.com"]);
        assert_eq!(filter_by_user_domains(rows(), Some(&admin)).len(), 5);
    }

    #[test]
    fn publisher_without_domains_sees_everything() {
        let publisher = user(Role::Publisher, &[]);
        assert_eq!(filter_by_user_domains(rows(), Some(&publisher)).len(), 5);
    }

    #[test]
    fn publisher_is_scoped_case_insensitively() {
        let publisher = user(Role::Publisher, &["  FINREZO.COM", "techpulse.io"]);
        let visible = filter_by_user_domains(rows(), Some(&publisher));

        assert_eq!(
            visible,
            vec![Row("finrezo.com"), Row(" FinRezo.com "), Row("techpulse.io")]
        );
    }

    #[test]
    fn empty_sites_are_hidden_from_publishers() {
        let publisher = user(Role::Publisher, &[""]);
        assert!(filter_by_user_domains(rows(), Some(&publisher)).is_empty());
    }
}
