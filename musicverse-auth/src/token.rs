//! Session credential encoding
//!
//! The credential is `base64(json({id, email, role, name, exp}))` with the standard alphabet
//! and padding, where `exp` is an absolute deadline in epoch milliseconds. The format is
//! kept byte-compatible with tokens written by the browser build (`btoa(JSON.stringify(..))`).
//!
//! There is no signature and no encryption. Anyone who can write the slot can mint a token.

use crate::account::{Account, Role, User};
use crate::{AuthError, AuthResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Payload carried by the session credential. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    /// Expiry, milliseconds since the Unix epoch
    pub exp: i64,
}

impl SessionPayload {
    /// Build a payload for `account` that expires `lifetime` from now
    ///
    /// A lifetime reaching past the last representable instant is capped there.
    pub fn issue(account: &Account, lifetime: Duration) -> Self {
        let exp = Utc::now()
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            id: account.id.to_string(),
            email: account.email.to_string(),
            role: account.role,
            name: account.name.to_string(),
            exp: exp.timestamp_millis(),
        }
    }

    /// A credential is valid while `now < exp`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.exp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
        }
    }

    /// Serialize into the opaque token string
    pub fn encode(&self) -> AuthResult<String> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Parse a token string. Does not check expiry.
    pub fn decode(token: &str) -> AuthResult<Self> {
        let bytes = STANDARD
            .decode(token.trim())
            .map_err(|e| AuthError::InvalidToken(format!("not base64: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidToken(format!("bad payload: {}", e)))
    }

    /// Decode and reject expired payloads
    pub fn verify(token: &str) -> AuthResult<Self> {
        let payload = Self::decode(token)?;
        if payload.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::DEMO_ACCOUNTS;

    fn payload(exp: i64) -> SessionPayload {
        SessionPayload {
            id: "1".to_string(),
            email: "admin@musicverse.com".to_string(),
            role: Role::Admin,
            name: "Admin User".to_string(),
            exp,
        }
    }

    #[test]
    fn test_wire_format_matches_browser_tokens() {
        // btoa(JSON.stringify({id:"1",email:"admin@musicverse.com",role:"admin",name:"Admin User",exp:1700000000000}))
        let expected = STANDARD.encode(
            r#"{"id":"1","email":"admin@musicverse.com","role":"admin","name":"Admin User","exp":1700000000000}"#,
        );

        let token = payload(1_700_000_000_000).encode().unwrap();
        assert_eq!(token, expected);
        assert_eq!(
            SessionPayload::decode(&expected).unwrap(),
            payload(1_700_000_000_000)
        );
    }

    #[test]
    fn test_issue_expires_after_lifetime() {
        let before = Utc::now().timestamp_millis();
        let issued = SessionPayload::issue(&DEMO_ACCOUNTS[1], Duration::hours(24));
        let after = Utc::now().timestamp_millis();

        let day_ms = 24 * 60 * 60 * 1000;
        assert!(issued.exp >= before + day_ms);
        assert!(issued.exp <= after + day_ms);
        assert_eq!(issued.role, Role::User);
        assert!(!issued.is_expired());
    }

    #[test]
    fn test_issue_caps_oversized_lifetime() {
        let issued = SessionPayload::issue(&DEMO_ACCOUNTS[0], Duration::hours(i64::from(u32::MAX)));
        assert_eq!(issued.exp, DateTime::<Utc>::MAX_UTC.timestamp_millis());
        assert!(!issued.is_expired());
    }

    #[test]
    fn test_expiry_boundary() {
        let p = payload(1_000);
        assert!(!p.is_expired_at(999));
        assert!(p.is_expired_at(1_000));
        assert!(p.is_expired_at(1_001));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let token = payload(Utc::now().timestamp_millis() - 1).encode().unwrap();
        assert!(matches!(
            SessionPayload::verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            SessionPayload::decode("%%% not base64 %%%"),
            Err(AuthError::InvalidToken(_))
        ));

        let not_json = STANDARD.encode("hello");
        assert!(SessionPayload::decode(&not_json).is_err());

        let missing_exp = STANDARD.encode(r#"{"id":"1","email":"a","role":"admin","name":"A"}"#);
        assert!(SessionPayload::decode(&missing_exp).is_err());

        let bad_role =
            STANDARD.encode(r#"{"id":"1","email":"a","role":"root","name":"A","exp":1}"#);
        assert!(SessionPayload::decode(&bad_role).is_err());
    }
}
