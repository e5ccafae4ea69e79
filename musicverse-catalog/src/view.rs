//! Filter, sort and group pipeline
//!
//! All functions here are pure: the same songs and filters always give the same view.

use crate::collation::locale_cmp;
use crate::filters::{GroupBy, MusicFilters, SortBy, SortOrder};
use crate::song::Song;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Label of the single group produced when grouping is off
pub const ALL_SONGS_LABEL: &str = "All Songs";

/// Songs sharing one group label, in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongGroup {
    pub label: String,
    pub songs: Vec<Song>,
}

/// The filtered sequence and its grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub songs: Vec<Song>,
    /// Groups in the order their label was first met in `songs`
    pub groups: Vec<SongGroup>,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn group(&self, label: &str) -> Option<&SongGroup> {
        self.groups.iter().find(|group| group.label == label)
    }
}

fn matches_search(song: &Song, needle: &str) -> bool {
    needle.is_empty()
        || song.title.to_lowercase().contains(needle)
        || song.artist.to_lowercase().contains(needle)
        || song.album.to_lowercase().contains(needle)
}

fn matches_genre(song: &Song, filters: &MusicFilters) -> bool {
    !filters.genre_filter_active() || song.genre == filters.genre
}

/// Keep songs passing both the text search and the genre filter, in collection order
pub fn filter_songs(songs: &[Song], filters: &MusicFilters) -> Vec<Song> {
    let needle = filters.search.to_lowercase();

    songs
        .iter()
        .filter(|song| matches_search(song, &needle) && matches_genre(song, filters))
        .cloned()
        .collect()
}

fn compare(a: &Song, b: &Song, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Title => locale_cmp(&a.title, &b.title),
        SortBy::Artist => locale_cmp(&a.artist, &b.artist),
        SortBy::Album => locale_cmp(&a.album, &b.album),
        SortBy::Year => a.year.cmp(&b.year),
    }
}

/// Stable single-key sort; equal keys keep their relative order in either direction
pub fn sort_songs(songs: &mut [Song], sort_by: SortBy, sort_order: SortOrder) {
    songs.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn group_key(song: &Song, group_by: GroupBy) -> &str {
    match group_by {
        GroupBy::None => ALL_SONGS_LABEL,
        GroupBy::Artist => &song.artist,
        GroupBy::Album => &song.album,
        GroupBy::Genre => &song.genre,
    }
}

/// Partition already sorted songs by the grouping field in a single left-to-right pass
pub fn group_songs(songs: &[Song], group_by: GroupBy) -> Vec<SongGroup> {
    if group_by == GroupBy::None {
        return vec![SongGroup {
            label: ALL_SONGS_LABEL.to_string(),
            songs: songs.to_vec(),
        }];
    }

    let mut groups: Vec<SongGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for song in songs {
        let key = group_key(song, group_by);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(SongGroup {
                label: key.to_string(),
                songs: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].songs.push(song.clone());
    }

    groups
}

/// Filter, sort, then group
pub fn compute_view(songs: &[Song], filters: &MusicFilters) -> CatalogView {
    let mut filtered = filter_songs(songs, filters);
    sort_songs(&mut filtered, filters.sort_by, filters.sort_order);
    let groups = group_songs(&filtered, filters.group_by);

    debug!(
        total = songs.len(),
        matched = filtered.len(),
        groups = groups.len(),
        sort_by = %filters.sort_by,
        sort_order = %filters.sort_order,
        group_by = %filters.group_by,
        "Computed catalog view"
    );

    CatalogView {
        songs: filtered,
        groups,
    }
}
