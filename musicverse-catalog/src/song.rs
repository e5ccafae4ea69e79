use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Assigned by the catalog on insertion, never reused
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Free text such as "5:55"
    pub duration: String,
    pub genre: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// A song before the catalog has given it an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub genre: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl NewSong {
    pub fn into_song(self, id: String) -> Song {
        Song {
            id,
            title: self.title,
            artist: self.artist,
            album: self.album,
            duration: self.duration,
            genre: self.genre,
            year: self.year,
            cover_url: self.cover_url,
        }
    }
}
