//! Music App - the session manager and catalog behind one owner
//!
//! All mutation goes through `&mut self`, so there is exactly one writer at a time.

use crate::permissions::{permissions_for, Permission};
use crate::validation::validate_new_song;
use crate::{ApplicationError, ApplicationResult};
use musicverse_auth::{Account, SessionManager, User};
use musicverse_catalog::{
    CatalogView, FilterUpdate, LibraryStats, MusicCatalog, MusicFilters, NewSong, Song,
};
use musicverse_core::{
    log_operation_error, log_operation_start, log_operation_success, performance,
    MusicverseConfig,
};
use serde::Serialize;
use tracing::debug;

/// Everything the library screen shows, recomputed on every call
#[derive(Debug, Clone, Serialize)]
pub struct LibraryPage {
    pub filters: MusicFilters,
    pub view: CatalogView,
    pub stats: LibraryStats,
    /// Size of the whole collection, ignoring filters
    pub total_songs: usize,
}

pub struct MusicApp {
    sessions: SessionManager,
    catalog: MusicCatalog,
}

impl MusicApp {
    pub fn new(sessions: SessionManager, catalog: MusicCatalog) -> Self {
        Self { sessions, catalog }
    }

    /// Validate the configuration, build from it and pick up any stored session
    pub fn start(config: &MusicverseConfig) -> ApplicationResult<Self> {
        log_operation_start!("start_app", seed = config.catalog.seed_on_start);
        config.validate().inspect_err(|e| {
            log_operation_error!("start_app", e);
        })?;

        let mut sessions = SessionManager::from_config(config);
        let restored = sessions.restore_session();

        let catalog = if config.catalog.seed_on_start {
            MusicCatalog::with_seed()
        } else {
            MusicCatalog::default()
        };

        log_operation_success!("start_app", restored = restored, songs = catalog.total_songs());
        Ok(Self::new(sessions, catalog))
    }

    pub fn login(&mut self, email: &str, password: &str) -> bool {
        self.sessions.login(email, password)
    }

    pub fn logout(&mut self) {
        self.sessions.logout();
    }

    pub fn current_user(&self) -> Option<&User> {
        self.sessions.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.sessions.is_admin()
    }

    /// The accounts offered on the login screen
    pub fn demo_accounts(&self) -> &'static [Account] {
        SessionManager::demo_accounts()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Read-only access to the underlying catalog, bypassing the session gate
    pub fn catalog(&self) -> &MusicCatalog {
        &self.catalog
    }

    fn require(&self, permission: Permission) -> ApplicationResult<()> {
        let user = self
            .sessions
            .current_user()
            .ok_or(ApplicationError::NotAuthenticated)?;

        if !permissions_for(user.role).contains(&permission) {
            debug!(user_id = %user.id, %permission, "Permission denied");
            return Err(ApplicationError::permission(format!(
                "{} role cannot {}",
                user.role, permission
            )));
        }

        Ok(())
    }

    /// The library screen under the current filters
    pub fn library(&self) -> ApplicationResult<LibraryPage> {
        self.require(Permission::ViewLibrary)?;

        Ok(performance::measure_sync("library_page", || {
            let view = self.catalog.view();
            let stats = musicverse_catalog::compute_stats(&view.songs);
            LibraryPage {
                filters: self.catalog.filters().clone(),
                view,
                stats,
                total_songs: self.catalog.total_songs(),
            }
        }))
    }

    pub fn filters(&self) -> ApplicationResult<&MusicFilters> {
        self.require(Permission::ViewLibrary)?;
        Ok(self.catalog.filters())
    }

    pub fn update_filters(&mut self, update: FilterUpdate) -> ApplicationResult<()> {
        self.require(Permission::ViewLibrary)?;
        self.catalog.update_filters(update);
        Ok(())
    }

    pub fn clear_filters(&mut self) -> ApplicationResult<()> {
        self.require(Permission::ViewLibrary)?;
        self.catalog.clear_filters();
        Ok(())
    }

    pub fn toggle_sort_order(&mut self) -> ApplicationResult<()> {
        self.require(Permission::ViewLibrary)?;
        self.catalog.toggle_sort_order();
        Ok(())
    }

    pub fn unique_artists(&self) -> ApplicationResult<Vec<String>> {
        self.require(Permission::ViewLibrary)?;
        Ok(self.catalog.unique_artists())
    }

    pub fn unique_albums(&self) -> ApplicationResult<Vec<String>> {
        self.require(Permission::ViewLibrary)?;
        Ok(self.catalog.unique_albums())
    }

    pub fn unique_genres(&self) -> ApplicationResult<Vec<String>> {
        self.require(Permission::ViewLibrary)?;
        Ok(self.catalog.unique_genres())
    }

    pub fn genre_options(&self) -> ApplicationResult<Vec<String>> {
        self.require(Permission::ViewLibrary)?;
        Ok(self.catalog.genre_options())
    }

    /// Validate and add a song. Admin only.
    pub fn add_song(&mut self, song: NewSong) -> ApplicationResult<Song> {
        self.require(Permission::ManageSongs)?;
        validate_new_song(&song)?;

        Ok(self.catalog.add(song))
    }

    /// Remove a song by id; an unknown id is not an error. Admin only.
    pub fn remove_song(&mut self, id: &str) -> ApplicationResult<bool> {
        self.require(Permission::ManageSongs)?;
        Ok(self.catalog.remove(id))
    }
}
