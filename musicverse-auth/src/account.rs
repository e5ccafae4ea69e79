//! Demo accounts and the current-user identity

use crate::AuthError;
use serde::{Deserialize, Serialize};

/// Account role; only admins may add or remove songs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(AuthError::InvalidRole(s.to_string())),
        }
    }
}

/// A compiled-in account. The password is stored and compared in plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub name: &'static str,
}

impl Account {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.to_string(),
            email: self.email.to_string(),
            role: self.role,
            name: self.name.to_string(),
        }
    }
}

/// The fixed account table. There is no way to create or delete accounts.
pub static DEMO_ACCOUNTS: [Account; 2] = [
    Account {
        id: "1",
        email: "admin@musicverse.com",
        password: "admin123",
        role: Role::Admin,
        name: "Admin User",
    },
    Account {
        id: "2",
        email: "user@musicverse.com",
        password: "user123",
        role: Role::User,
        name: "Regular User",
    },
];

/// Case-sensitive exact match on both email and password
pub fn find_account(email: &str, password: &str) -> Option<&'static Account> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.email == email && account.password == password)
}

/// Identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
