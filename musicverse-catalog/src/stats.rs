//! Library statistics over the filtered sequence

use crate::song::Song;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Reported when there are no songs to count
pub const NO_GENRE_LABEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_songs: usize,
    pub unique_artists: usize,
    pub unique_genres: usize,
    /// Genre with the most songs; on a tie the genre met first wins
    pub most_popular_genre: String,
    /// Song count per genre, in first-encountered order
    pub genre_distribution: Vec<(String, usize)>,
}

pub fn compute_stats(songs: &[Song]) -> LibraryStats {
    let artists: HashSet<&str> = songs.iter().map(|s| s.artist.as_str()).collect();

    let mut genre_distribution: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for song in songs {
        match positions.get(song.genre.as_str()) {
            Some(&i) => genre_distribution[i].1 += 1,
            None => {
                positions.insert(&song.genre, genre_distribution.len());
                genre_distribution.push((song.genre.clone(), 1));
            }
        }
    }

    let mut most_popular: Option<&(String, usize)> = None;
    for entry in &genre_distribution {
        if most_popular.map_or(true, |best| entry.1 > best.1) {
            most_popular = Some(entry);
        }
    }
    let most_popular_genre = most_popular
        .map(|(genre, _)| genre.clone())
        .unwrap_or_else(|| NO_GENRE_LABEL.to_string());

    LibraryStats {
        total_songs: songs.len(),
        unique_artists: artists.len(),
        unique_genres: genre_distribution.len(),
        most_popular_genre,
        genre_distribution,
    }
}
