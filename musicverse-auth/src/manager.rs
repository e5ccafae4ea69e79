//! Session Manager - login, logout and session restore
//!
//! Owns the credential slot and the current-user state. Every operation completes
//! immediately; credential problems fall back to a logged-out state instead of failing.

use crate::account::{find_account, Account, User, DEMO_ACCOUNTS};
use crate::slot::CredentialSlot;
use crate::token::SessionPayload;
use crate::AuthError;
use chrono::Duration;
use musicverse_core::{MusicverseConfig, SlotBacking};
use tracing::{debug, info, warn};

pub struct SessionManager {
    slot: CredentialSlot,
    lifetime: Duration,
    current_user: Option<User>,
}

impl SessionManager {
    /// Create a logged-out manager. Call [`SessionManager::restore_session`] to pick up a
    /// stored credential.
    pub fn new(slot: CredentialSlot, lifetime: Duration) -> Self {
        Self {
            slot,
            lifetime,
            current_user: None,
        }
    }

    /// Build the slot described by the configuration
    pub fn from_config(config: &MusicverseConfig) -> Self {
        let key = config.session.storage_key.clone();
        let slot = match config.session.storage {
            SlotBacking::Memory => CredentialSlot::memory(key),
            SlotBacking::File => CredentialSlot::file(config.storage.resolved_data_dir(), key),
        };

        Self::new(slot, Duration::hours(i64::from(config.session.lifetime_hours)))
    }

    /// Log in with an exact email/password match against the demo accounts
    ///
    /// Returns `false` without touching any state when nothing matches.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(account) = find_account(email, password) else {
            debug!("Login rejected for {}", email);
            return false;
        };

        let payload = SessionPayload::issue(account, self.lifetime);
        match payload.encode() {
            Ok(token) => {
                if let Err(e) = self.slot.store(&token) {
                    warn!("Session credential not persisted, session is in-memory only: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode session credential: {}", e),
        }

        info!(user_id = %account.id, role = %account.role, "User logged in");
        self.current_user = Some(account.to_user());
        true
    }

    /// Clear the stored credential and the current user. Safe to call when logged out.
    pub fn logout(&mut self) {
        if let Err(e) = self.slot.clear() {
            warn!("Failed to clear session credential: {}", e);
        }

        if let Some(user) = self.current_user.take() {
            info!(user_id = %user.id, "User logged out");
        }
    }

    /// Pick up a stored credential, if one is present and still valid
    ///
    /// Corrupt or expired credentials are removed from the slot. Returns whether a user
    /// is now logged in.
    pub fn restore_session(&mut self) -> bool {
        let token = match self.slot.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored session credential");
                return false;
            }
            Err(e) => {
                warn!("Discarding unreadable session credential: {}", e);
                self.discard_credential();
                return false;
            }
        };

        match SessionPayload::verify(&token) {
            Ok(payload) => {
                let user = payload.to_user();
                info!(user_id = %user.id, "Restored session");
                self.current_user = Some(user);
                true
            }
            Err(e) => {
                match e {
                    AuthError::TokenExpired => debug!("Stored session credential expired"),
                    _ => warn!("Discarding unreadable session credential: {}", e),
                }
                self.discard_credential();
                false
            }
        }
    }

    fn discard_credential(&mut self) {
        if let Err(e) = self.slot.clear() {
            warn!("Failed to clear session credential: {}", e);
        }
        self.current_user = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    /// The demo account table, for "fill in demo credentials" helpers
    pub fn demo_accounts() -> &'static [Account] {
        &DEMO_ACCOUNTS
    }

    pub fn slot(&self) -> &CredentialSlot {
        &self.slot
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
