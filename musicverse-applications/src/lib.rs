//! Musicverse Applications - the role-gated music library
//!
//! [`MusicApp`] is the single owner of the session manager and the catalog. Viewing the
//! library requires a logged-in user; adding and removing songs requires the admin role.

pub mod app;
pub mod permissions;
pub mod validation;

pub use app::{LibraryPage, MusicApp};
pub use permissions::{permissions_for, Permission};
pub use validation::validate_new_song;

// Re-export the building blocks front ends need
pub use musicverse_auth::{Account, Role, User};
pub use musicverse_catalog::{
    CatalogView, FilterUpdate, GroupBy, LibraryStats, MusicFilters, NewSong, Song, SongGroup,
    SortBy, SortOrder,
};

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Permission error: {message}")]
    Permission { message: String },

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] musicverse_core::MusicverseError),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Create a permission error
    pub fn permission<S: Into<String>>(message: S) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create a validation error for `field`
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
