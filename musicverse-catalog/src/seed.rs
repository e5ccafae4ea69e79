//! Sample library loaded at startup

use crate::song::Song;

/// Genres offered by the add-song picker in addition to those already in the library
pub const COMMON_GENRES: &[&str] = &[
    "Rock",
    "Pop",
    "Hip Hop",
    "Jazz",
    "Classical",
    "Electronic",
    "Folk",
    "R&B",
    "Country",
    "Blues",
    "Reggae",
    "Metal",
    "Punk",
    "Soul",
    "Funk",
    "Grunge",
    "Folk Rock",
];

const PLACEHOLDER_COVER: &str = "/placeholder.svg";

const SEED: &[(&str, &str, &str, &str, &str, &str, i32)] = &[
    ("1", "Bohemian Rhapsody", "Queen", "A Night at the Opera", "5:55", "Rock", 1975),
    ("2", "Hotel California", "Eagles", "Hotel California", "6:30", "Rock", 1976),
    ("3", "Imagine", "John Lennon", "Imagine", "3:07", "Pop", 1971),
    ("4", "Billie Jean", "Michael Jackson", "Thriller", "4:54", "Pop", 1983),
    ("5", "Like a Rolling Stone", "Bob Dylan", "Highway 61 Revisited", "6:13", "Folk Rock", 1965),
    ("6", "Smells Like Teen Spirit", "Nirvana", "Nevermind", "5:01", "Grunge", 1991),
    ("7", "What's Going On", "Marvin Gaye", "What's Going On", "3:53", "Soul", 1971),
    ("8", "Purple Haze", "Jimi Hendrix", "Are You Experienced", "2:51", "Rock", 1967),
    ("9", "Good Vibrations", "The Beach Boys", "Pet Sounds", "3:39", "Pop", 1966),
    ("10", "Lose Yourself", "Eminem", "8 Mile Soundtrack", "5:26", "Hip Hop", 2002),
];

/// The ten sample songs, ids "1" through "10"
pub fn seed_songs() -> Vec<Song> {
    SEED.iter()
        .map(|&(id, title, artist, album, duration, genre, year)| Song {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration: duration.to_string(),
            genre: genre.to_string(),
            year,
            cover_url: Some(PLACEHOLDER_COVER.to_string()),
        })
        .collect()
}
