use secrecy::SecretString;
use serde::Deserialize;
use std::{path::PathBuf, sync::LazyLock};
use types::{Result, err};

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().unwrap_or_else(|e| panic!("failed to load configuration: {e}")));

#[derive(Clone, Deserialize)]
pub struct Config {
    /// Where the created-users file lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// HMAC key for the session cookie.
    pub session_secret: SecretString,
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Config {
    /// Reads `addesk.toml` (optional) and then `ADDESK_*` environment variables.
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("addesk").required(false))
            .add_source(config::Environment::with_prefix("ADDESK"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| err!("invalid configuration: {e}"))
    }
}
