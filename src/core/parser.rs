use std::path::Path;

use crate::models::TrackMeta;

/// Guess artist and title from a filename.
///
/// The stem (extension stripped) is split on the first `-`:
/// "Artist - Title.mp3" gives artist "Artist", title "Title".
/// Filenames without a `-` (or with an empty half) yield no guess.
pub fn guess_from_filename(path: &Path) -> Option<TrackMeta> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;

    let (artist, name) = stem.split_once('-')?;
    let artist = artist.trim();
    let name = name.trim();

    if artist.is_empty() || name.is_empty() {
        return None;
    }

    Some(TrackMeta {
        artist: artist.to_string(),
        name: name.to_string(),
    })
}
