use secrecy::ExposeSecret;
use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, LazyLock},
};
use tokio::sync::RwLock;
use types::{CurrentUser, NewUser, Result, Role, UserRecord, err, user::normalize_domains};

use crate::{CONFIG, fixtures};

/// File in the data directory holding users created or edited at runtime.
pub const CREATED_USERS_FILE: &str = "domain_users_created.json";

pub static STORE: LazyLock<Arc<UserStore>> = LazyLock::new(|| {
    Arc::new(UserStore::new(
        CONFIG.data_dir.join(CREATED_USERS_FILE),
        fixtures::domain_users(),
    ))
});

/// Mock credential store: the fixture accounts plus a JSON file of created
/// accounts. Stored records shadow fixture records with the same username.
pub struct UserStore {
    path: PathBuf,
    fixture: Vec<UserRecord>,
    lock: RwLock<()>,
}

impl UserStore {
    pub fn new(path: PathBuf, fixture: Vec<UserRecord>) -> Self {
        Self {
            path,
            fixture,
            lock: RwLock::new(()),
        }
    }

    /// A missing or corrupt file reads as no stored users.
    async fn read_stored(&self) -> Vec<UserRecord> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                tracing::warn!(?error, path = %self.path.display(), "failed to read user store");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(users) => users,
            Err(error) => {
                tracing::warn!(?error, path = %self.path.display(), "ignoring corrupt user store");
                Vec::new()
            }
        }
    }

    async fn write_stored(&self, users: &[UserRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(users)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    fn merge(&self, stored: Vec<UserRecord>) -> Vec<UserRecord> {
        let mut stored = stored;
        let mut users = Vec::with_capacity(self.fixture.len() + stored.len());

        for fixed in &self.fixture {
            match stored.iter().position(|u| u.has_username(&fixed.username)) {
                Some(idx) => users.push(stored.remove(idx)),
                None => users.push(fixed.clone()),
            }
        }
        users.extend(stored);
        users
    }

    pub async fn all_users(&self) -> Vec<UserRecord> {
        let _guard = self.lock.read().await;
        self.merge(self.read_stored().await)
    }

    pub async fn add_user(&self, new_user: NewUser) -> Result<UserRecord> {
        new_user.validate()?;

        let _guard = self.lock.write().await;
        let mut stored = self.read_stored().await;
        let exists = self
            .merge(stored.clone())
            .iter()
            .any(|u| u.has_username(&new_user.username));
        if exists {
            return Err("Username already exists.".into());
        }

        let record = new_user.into_record();
        stored.push(record.clone());
        self.write_stored(&stored).await?;

        tracing::info!(username = %record.username, role = %record.role, "created user");
        Ok(record)
    }

    /// Username is matched trimmed and case-insensitively, the password exactly.
    pub async fn validate_login(&self, username: &str, password: &str) -> Option<CurrentUser> {
        self.all_users()
            .await
            .into_iter()
            .find(|u| u.has_username(username) && u.password.expose_secret() == password)
            .map(|u| u.current_user())
    }

    pub async fn update_role(&self, username: &str, role: Role) -> Result<UserRecord> {
        self.edit(username, |user| {
            user.role = role;
            Ok(())
        })
        .await
    }

    /// An empty list means every domain, so a publisher must keep at least one.
    pub async fn set_domains(&self, username: &str, domains: Vec<String>) -> Result<UserRecord> {
        let domains = normalize_domains(domains);
        self.edit(username, |user| {
            if domains.is_empty() && user.role == Role::Publisher {
                return Err("A publisher needs at least one domain.".into());
            }
            user.domains = domains;
            Ok(())
        })
        .await
    }

    async fn edit(
        &self,
        username: &str,
        change: impl FnOnce(&mut UserRecord) -> Result<()>,
    ) -> Result<UserRecord> {
        let _guard = self.lock.write().await;
        let mut stored = self.read_stored().await;

        let idx = match stored.iter().position(|u| u.has_username(username)) {
            Some(idx) => idx,
            None => {
                let fixed = self
                    .fixture
                    .iter()
                    .find(|u| u.has_username(username))
                    .ok_or_else(|| err!("user '{}' not found", username))?;
                stored.push(fixed.clone());
                stored.len() - 1
            }
        };

        change(&mut stored[idx])?;
        let updated = stored[idx].clone();
        self.write_stored(&stored).await?;

        tracing::info!(
            username = %updated.username,
            role = %updated.role,
            domains = ?updated.domains,
            "updated user"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> Vec<UserRecord> {
        serde_json::from_str(
            r#"[
                {"username": "admin@gmail.com", "password": "admin123", "role": "Admin", "domains": []},
                {"username": "publisher@finrezo.com", "password": "finrezo123", "role": "Publisher", "domains": ["finrezo.com"]}
            ]"#,
        )
        .unwrap()
    }

    fn store(dir: &TempDir) -> UserStore {
        UserStore::new(dir.path().join("nested").join(CREATED_USERS_FILE), fixture())
    }

    fn new_user(username: &str, domains: &[&str]) -> NewUser {
        NewUser {
            username: username.into(),
            password: "secret1".to_string().into(),
            role: Role::Publisher,
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn login_checks_fixture_accounts() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let user = store
            .validate_login("  Publisher@FinRezo.com ", "finrezo123")
            .await
            .unwrap();
        assert_eq!(user.username, "publisher@finrezo.com");
        assert_eq!(user.domains, vec!["finrezo.com"]);

        assert!(store.validate_login("publisher@finrezo.com", "FINREZO123").await.is_none());
        assert!(store.validate_login("nobody", "finrezo123").await.is_none());
    }

    #[tokio::test]
    async fn created_users_persist_and_can_log_in() {
        let dir = TempDir::new().unwrap();
        store(&dir)
            .add_user(new_user(" jsmith ", &["newsbay.net"]))
            .await
            .unwrap();

        // A fresh store on the same file sees the user.
        let reopened = store(&dir);
        let users = reopened.all_users().await;
        assert_eq!(users.len(), 3);
        assert_eq!(users[2].username, "jsmith");

        let session = reopened.validate_login("JSMITH", "secret1").await.unwrap();
        assert_eq!(session.role, Role::Publisher);
        assert_eq!(session.domains, vec!["newsbay.net"]);
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.add_user(new_user("ADMIN@gmail.com", &[])).await.unwrap_err();
        assert_eq!(err.to_string(), "Username already exists.");

        store.add_user(new_user("jsmith", &[])).await.unwrap();
        assert!(store.add_user(new_user("JSmith", &[])).await.is_err());
    }

    #[tokio::test]
    async fn short_passwords_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut user = new_user("jsmith", &[]);
        user.password = "12345".to_string().into();

        assert!(store(&dir).add_user(user).await.is_err());
        assert!(!dir.path().join("nested").exists());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join(CREATED_USERS_FILE), "{not json").unwrap();

        assert_eq!(store.all_users().await.len(), 2);
        store.add_user(new_user("jsmith", &[])).await.unwrap();
        assert_eq!(store.all_users().await.len(), 3);
    }

    #[tokio::test]
    async fn editing_a_fixture_user_shadows_it() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .set_domains("publisher@finrezo.com", vec!["finrezo.com".into(), "newsbay.net".into()])
            .await
            .unwrap();
        store.update_role("publisher@finrezo.com", Role::Admin).await.unwrap();

        let users = store.all_users().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, Role::Admin);
        assert_eq!(users[1].domains.len(), 2);

        // The password still comes from the fixture record.
        assert!(store.validate_login("publisher@finrezo.com", "finrezo123").await.is_some());
    }

    #[tokio::test]
    async fn publishers_keep_at_least_one_domain() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.add_user(new_user("jsmith", &["extra.org"])).await.unwrap();

        let err = store.set_domains("jsmith", vec![" ".into()]).await.unwrap_err();
        assert_eq!(err.to_string(), "A publisher needs at least one domain.");
        let session = store.validate_login("jsmith", "secret1").await.unwrap();
        assert_eq!(session.domains, vec!["extra.org"]);
        assert!(!session.sees_all_domains());

        let updated = store
            .set_domains("jsmith", vec!["extra.org".into(), " EXTRA.org".into(), "finrezo.com".into()])
            .await
            .unwrap();
        assert_eq!(updated.domains, vec!["extra.org", "finrezo.com"]);

        // Admins see everything anyway.
        assert!(store.set_domains("admin@gmail.com", Vec::new()).await.is_ok());
    }

    #[tokio::test]
    async fn editing_unknown_user_fails() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).update_role("ghost", Role::Admin).await.is_err());
    }
}
