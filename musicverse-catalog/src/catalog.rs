//! The catalog engine: owned song collection plus current filter settings

use crate::filters::{FilterUpdate, MusicFilters};
use crate::seed::{seed_songs, COMMON_GENRES};
use crate::song::{NewSong, Song};
use crate::stats::{compute_stats, LibraryStats};
use crate::view::{compute_view, CatalogView};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct MusicCatalog {
    songs: Vec<Song>,
    filters: MusicFilters,
    /// Next id to hand out; only ever grows, so removed ids are never reissued
    next_id: u64,
}

impl Default for MusicCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MusicCatalog {
    /// Create a catalog over `songs` with default filters
    pub fn new(songs: Vec<Song>) -> Self {
        // Ids with no successor are ignored when picking where the counter starts
        let next_id = songs
            .iter()
            .filter_map(|song| song.id.parse::<u64>().ok()?.checked_add(1))
            .max()
            .unwrap_or(1);

        Self {
            songs,
            filters: MusicFilters::default(),
            next_id,
        }
    }

    /// Create a catalog holding the ten sample songs
    pub fn with_seed() -> Self {
        Self::new(seed_songs())
    }

    /// Append a song under a fresh id. Field contents are not validated here.
    pub fn add(&mut self, song: NewSong) -> Song {
        let id = self.next_id.to_string();
        self.next_id = self.next_id.saturating_add(1);

        let song = song.into_song(id);
        info!(id = %song.id, title = %song.title, "Added song");
        self.songs.push(song.clone());
        song
    }

    /// Remove the song with `id`; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| song.id != id);
        let removed = self.songs.len() != before;

        if removed {
            info!(id = %id, "Removed song");
        } else {
            debug!(id = %id, "Remove ignored, no such song");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// Full collection in insertion order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn filters(&self) -> &MusicFilters {
        &self.filters
    }

    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
        debug!(filters = ?self.filters, "Filters updated");
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(FilterUpdate::reset());
    }

    pub fn toggle_sort_order(&mut self) {
        let toggled = self.filters.sort_order.toggled();
        self.update_filters(FilterUpdate::new().sort_order(toggled));
    }

    /// Filtered, sorted and grouped view under the current filters
    pub fn view(&self) -> CatalogView {
        compute_view(&self.songs, &self.filters)
    }

    /// Statistics over the current filtered sequence
    pub fn stats(&self) -> LibraryStats {
        compute_stats(&self.view().songs)
    }

    /// Number of songs in the whole collection, ignoring filters
    pub fn total_songs(&self) -> usize {
        self.songs.len()
    }

    pub fn unique_artists(&self) -> Vec<String> {
        unique_sorted(self.songs.iter().map(|song| song.artist.as_str()))
    }

    pub fn unique_albums(&self) -> Vec<String> {
        unique_sorted(self.songs.iter().map(|song| song.album.as_str()))
    }

    pub fn unique_genres(&self) -> Vec<String> {
        unique_sorted(self.songs.iter().map(|song| song.genre.as_str()))
    }

    /// Genre choices for a new song: common genres plus every genre already present
    pub fn genre_options(&self) -> Vec<String> {
        unique_sorted(
            COMMON_GENRES
                .iter()
                .copied()
                .chain(self.songs.iter().map(|song| song.genre.as_str())),
        )
    }
}

/// Deduplicate keeping first occurrences, then sort by code point
fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect();
    unique.sort();
    unique
}
