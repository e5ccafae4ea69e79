//! Musicverse Auth - mock session management
//!
//! This crate provides the login gate in front of the music catalog:
//! - A compiled-in table of demo accounts with plaintext passwords
//! - A session credential that is base64-encoded JSON, with no signature
//! - A durable slot the credential is kept in between runs
//!
//! None of this is a security boundary. The credential can be read and forged by anyone
//! with access to the slot. A real deployment would need a signed credential, which is a
//! redesign rather than a configuration change.

pub mod account;
pub mod manager;
pub mod slot;
pub mod token;

pub use account::{find_account, Account, Role, User, DEMO_ACCOUNTS};
pub use manager::SessionManager;
pub use slot::CredentialSlot;
pub use token::SessionPayload;

/// Errors raised inside the session manager
///
/// These never leave `login` or `restore_session`; both degrade to a logged-out state.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Unknown role: {0}")]
    InvalidRole(String),
    #[error("Credential storage failed: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Token encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
