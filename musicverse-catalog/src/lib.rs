//! Musicverse Catalog - the song library and its derived views
//!
//! The catalog owns a list of songs and the current filter settings. Views are never
//! stored: every call to [`MusicCatalog::view`] or [`MusicCatalog::stats`] recomputes them
//! from the collection, so they always reflect the latest `add`/`remove`/filter change.
//!
//! The pipeline is filter, then a stable single-key sort, then grouping.

pub mod catalog;
pub mod collation;
pub mod filters;
pub mod seed;
pub mod song;
pub mod stats;
pub mod view;

pub use catalog::MusicCatalog;
pub use collation::locale_cmp;
pub use filters::{FilterUpdate, GroupBy, MusicFilters, SortBy, SortOrder};
pub use seed::{seed_songs, COMMON_GENRES};
pub use song::{NewSong, Song};
pub use stats::{compute_stats, LibraryStats};
pub use view::{compute_view, filter_songs, group_songs, sort_songs, CatalogView, SongGroup};
