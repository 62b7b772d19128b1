use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use types::{CurrentUser, Result, decode_session, encode_session, err};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &SecretString) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|e| err!("invalid session secret: {e}"))
}

/// Encode the user and append an HMAC so the cookie cannot be edited.
pub fn sign_session(user: &CurrentUser, secret: &SecretString) -> Result<String> {
    let payload = encode_session(user)?;

    let mut mac = mac(secret)?;
    mac.update(payload.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", payload, signature))
}

pub fn verify_session(token: &str, secret: &SecretString) -> Result<CurrentUser> {
    let (payload, signature_b64) = token
        .split_once('.')
        .ok_or_else(|| err!("invalid session format"))?;

    let mut mac = mac(secret)?;
    mac.update(payload.as_bytes());
    let signature = BASE64_URL_SAFE_NO_PAD.decode(signature_b64)?;
    mac.verify_slice(&signature)
        .map_err(|_| err!("session signature mismatch"))?;

    decode_session(payload)
}

/// Find the session cookie in a raw `Cookie` header.
pub fn session_cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Role;

    fn secret() -> SecretString {
        "test-secret".to_string().into()
    }

    fn user() -> CurrentUser {
        CurrentUser {
            username: "publisher@finrezo.com".into(),
            role: Role::Publisher,
            domains: vec!["finrezo.com".into()],
        }
    }

    #[test]
    fn signed_session_verifies() {
        let token = sign_session(&user(), &secret()).unwrap();
        assert_eq!(verify_session(&token, &secret()).unwrap(), user());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_session(&user(), &secret()).unwrap();
        let other: SecretString = "other".to_string().into();
        assert!(verify_session(&token, &other).is_err());
    }

    #[test]
    fn widened_domains_are_rejected() {
        let token = sign_session(&user(), &secret()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let mut admin = user();
        admin.role = Role::Admin;
        let forged = format!("{}.{}", encode_session(&admin).unwrap(), signature);

        assert!(verify_session(&forged, &secret()).is_err());
        assert!(verify_session("no-dot", &secret()).is_err());
    }

    #[test]
    fn finds_cookie_among_others() {
        let header = "theme=dark; addesk_session=abc.def; other=1";
        assert_eq!(session_cookie_value(header, "addesk_session"), Some("abc.def"));
        assert_eq!(session_cookie_value("addesk_sessionx=1", "addesk_session"), None);
        assert_eq!(session_cookie_value("", "addesk_session"), None);
    }
}
