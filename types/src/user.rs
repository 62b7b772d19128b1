use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum password length accepted when creating a user.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    Admin,
    #[default]
    Publisher,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Publisher];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Publisher => "Publisher",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Admin => "All Access Admin",
            Role::Publisher => "Specific Domain Access Only",
        }
    }
}

/// Unknown or empty roles fall back to [`Role::Publisher`].
impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Publisher
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account. Passwords are kept and compared in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(with = "secret_string")]
    pub password: SecretString,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl UserRecord {
    pub fn has_username(&self, username: &str) -> bool {
        self.username.trim().to_lowercase() == username.trim().to_lowercase()
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            username: self.username.clone(),
            role: self.role,
            domains: self.domains.clone(),
        }
    }
}

/// The signed-in user, as carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins and users without assigned domains see every row.
    pub fn sees_all_domains(&self) -> bool {
        self.is_admin() || self.domains.is_empty()
    }

    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

/// A user row for the admin table. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub domains: Vec<String>,
}

impl UserSummary {
    pub fn from_records(records: &[UserRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| Self {
                id: format!("{:02}", idx + 1),
                username: record.username.clone(),
                role: record.role,
                domains: record.domains.clone(),
            })
            .collect()
    }

    pub fn domain_label(&self) -> String {
        if self.role == Role::Admin || self.domains.is_empty() {
            "All domains".to_string()
        } else {
            self.domains.join(", ")
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    #[serde(with = "secret_string")]
    pub password: SecretString,
    pub role: Role,
    pub domains: Vec<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), &'static str> {
        use secrecy::ExposeSecret;

        if self.username.trim().is_empty() {
            return Err("Username is required.");
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 6 characters.");
        }
        Ok(())
    }

    pub fn into_record(self) -> UserRecord {
        UserRecord {
            username: self.username.trim().to_string(),
            password: self.password,
            role: self.role,
            domains: normalize_domains(self.domains),
        }
    }
}

/// Split a textarea value into one domain per line.
pub fn parse_domain_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Trim, drop blanks and remove case-insensitive duplicates, keeping order.
pub fn normalize_domains(domains: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(domains.len());
    for domain in domains {
        let domain = domain.trim();
        if !domain.is_empty() && !out.iter().any(|d| d.eq_ignore_ascii_case(domain)) {
            out.push(domain.to_string());
        }
    }
    out
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use secrecy::ExposeSecret;
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn role_parsing_is_lenient() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from(" ADMIN "), Role::Admin);
        assert_eq!(Role::from("Publisher"), Role::Publisher);
        assert_eq!(Role::from(""), Role::Publisher);
        assert_eq!(Role::from("editor"), Role::Publisher);
    }

    #[test]
    fn record_reads_fixture_shape() {
        let record: UserRecord = serde_json::from_str(
            r#"{"username": "pub@finrezo.com", "password": "secret1", "role": "publisher"}"#,
        )
        .unwrap();

        assert_eq!(record.role, Role::Publisher);
        assert!(record.domains.is_empty());
        assert_eq!(record.password.expose_secret(), "secret1");
        assert!(record.has_username("  PUB@finrezo.com"));
    }

    #[test]
    fn domain_lines_drop_blanks() {
        assert_eq!(
            parse_domain_lines(" finrezo.com \n\n newsbay.net\n  \n"),
            vec!["finrezo.com", "newsbay.net"]
        );
    }

    #[test]
    fn new_user_validation() {
        let mut user = NewUser {
            username: "  ".into(),
            password: "secret1".to_string().into(),
            role: Role::Publisher,
            domains: vec![],
        };
        assert_eq!(user.validate(), Err("Username is required."));

        user.username = "jsmith".into();
        user.password = "12345".to_string().into();
        assert_eq!(user.validate(), Err("Password must be at least 6 characters."));

        user.password = "123456".to_string().into();
        assert_eq!(user.validate(), Ok(()));
    }

    #[test]
    fn into_record_trims_and_dedups() {
        let record = NewUser {
            username: " jsmith ".into(),
            password: "secret1".to_string().into(),
            role: Role::Publisher,
            domains: vec![" finrezo.com".into(), "FINREZO.com".into(), "".into()],
        }
        .into_record();

        assert_eq!(record.username, "jsmith");
        assert_eq!(record.domains, vec!["finrezo.com"]);
    }

    #[test]
    fn summaries_number_rows() {
        let records: Vec<UserRecord> = serde_json::from_str(
            r#"[
                {"username": "master", "password": "x", "role": "Admin", "domains": ["a.com"]},
                {"username": "pub", "password": "x", "role": "Publisher", "domains": ["a.com", "b.com"]}
            ]"#,
        )
        .unwrap();

        let summaries = UserSummary::from_records(&records);
        assert_eq!(summaries[0].id, "01");
        assert_eq!(summaries[0].domain_label(), "All domains");
        assert_eq!(summaries[1].id, "02");
        assert_eq!(summaries[1].domain_label(), "a.com, b.com");
    }
}
