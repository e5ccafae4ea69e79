//! What each role may do with the library

use musicverse_auth::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Browse, search, sort and group the library
    ViewLibrary,
    /// Add and remove songs
    ManageSongs,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::ViewLibrary => write!(f, "view_library"),
            Permission::ManageSongs => write!(f, "manage_songs"),
        }
    }
}

pub fn permissions_for(role: Role) -> HashSet<Permission> {
    use Permission::*;

    match role {
        Role::User => [ViewLibrary].into_iter().collect(),
        Role::Admin => [ViewLibrary, ManageSongs].into_iter().collect(),
    }
}
