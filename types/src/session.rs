use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::{CurrentUser, Result};

pub const SESSION_COOKIE_NAME: &str = "addesk_session";

/// `/login?error=` value for a failed credential check.
pub const INVALID_CREDENTIALS: &str = "invalid";

pub fn encode_session(user: &CurrentUser) -> Result<String> {
    let json = serde_json::to_string(user)?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

pub fn decode_session(encoded: &str) -> Result<CurrentUser> {
    let bytes = URL_SAFE_NO_PAD.decode(encoded)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}
