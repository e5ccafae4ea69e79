//! Required-field checks for the add-song form
//!
//! The catalog accepts anything; `MusicApp::add_song` runs this before touching it.

use crate::{ApplicationError, ApplicationResult};
use musicverse_catalog::NewSong;

/// Reject a song with an empty title, artist, album, duration or genre
pub fn validate_new_song(song: &NewSong) -> ApplicationResult<()> {
    let required = [
        ("title", &song.title),
        ("artist", &song.artist),
        ("album", &song.album),
        ("duration", &song.duration),
        ("genre", &song.genre),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApplicationError::validation(
                field,
                format!("{} is required", field),
            ));
        }
    }

    Ok(())
}
