use axum::http::{header, HeaderMap};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie binding a client to its session
pub const SESSION_COOKIE: &str = "recommendi_session";

/// Signs and verifies the session cookie.
///
/// The cookie value is `<session id>.<signature>` where the signature is the
/// hex HMAC-SHA256 of the session id keyed with the secret.
#[derive(Clone)]
pub struct SessionCookie {
    mac: HmacSha256,
}

impl SessionCookie {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            mac: HmacSha256::new_from_slice(secret.as_ref())
                .expect("HMAC accepts keys of any length"),
        }
    }

    fn keyed(&self, id: &Uuid) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac
    }

    pub fn encode(&self, id: &Uuid) -> String {
        let signature = self.keyed(id).finalize().into_bytes();
        format!("{}.{}", id, hex::encode(signature))
    }

    /// Returns the session id if the value carries a valid signature.
    /// The comparison runs in constant time.
    pub fn decode(&self, value: &str) -> Option<Uuid> {
        let (id, signature) = value.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        let signature = hex::decode(signature).ok()?;
        self.keyed(&id).verify_slice(&signature).ok().map(|_| id)
    }

    /// Session id from the request's `Cookie` headers, if present and valid
    pub fn session_id(&self, headers: &HeaderMap) -> Option<Uuid> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| self.decode(value))
    }

    /// `Set-Cookie` value binding the client to a session
    pub fn set_cookie(&self, id: &Uuid) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.encode(id)
        )
    }

    /// `Set-Cookie` value expiring the session cookie
    pub fn clear_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}
