//! The durable credential slot
//!
//! One opaque string stored under a fixed key. Absence means logged out.

use crate::AuthResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage behind the credential slot
#[derive(Debug, Clone)]
pub enum CredentialSlot {
    /// Held in process (tests and ephemeral sessions)
    Memory { key: String, value: Option<String> },
    /// A file named after the key inside `dir`
    File { key: String, dir: PathBuf },
}

impl CredentialSlot {
    pub fn memory(key: impl Into<String>) -> Self {
        Self::Memory {
            key: key.into(),
            value: None,
        }
    }

    pub fn file(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self::File {
            key: key.into(),
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Memory { key, .. } | Self::File { key, .. } => key,
        }
    }

    /// Location of the backing file, if any
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Memory { .. } => None,
            Self::File { key, dir } => Some(dir.join(key)),
        }
    }

    /// Read the stored token; `Ok(None)` when nothing is stored
    pub fn load(&self) -> AuthResult<Option<String>> {
        match self {
            Self::Memory { value, .. } => Ok(value.clone()),
            Self::File { key, dir } => match std::fs::read_to_string(dir.join(key)) {
                Ok(token) => Ok(Some(token)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }

    pub fn store(&mut self, token: &str) -> AuthResult<()> {
        match self {
            Self::Memory { value, .. } => {
                *value = Some(token.to_string());
            }
            Self::File { key, dir } => {
                std::fs::create_dir_all(&*dir)?;
                let path = dir.join(&*key);
                std::fs::write(&path, token)?;
                debug!("Stored session credential at {}", path.display());
            }
        }
        Ok(())
    }

    /// Remove the stored token; clearing an empty slot is not an error
    pub fn clear(&mut self) -> AuthResult<()> {
        match self {
            Self::Memory { value, .. } => {
                *value = None;
            }
            Self::File { key, dir } => match std::fs::remove_file(dir.join(&*key)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}
