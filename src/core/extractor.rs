use crate::core::{parser, tagger};
use crate::models::{MetadataSource, TrackDescriptor};

/// 경로만 아는 트랙의 아티스트/제목을 채운다.
///
/// ID3 태그가 우선이고, 그때의 파일명 추측은 2차 검색용으로 보관된다.
/// 태그가 없으면 추측이 활성 소스가 되고, 그마저 없으면 Unresolved로 남는다.
/// 경로만의 순수 함수라서 다시 호출해도 결과가 같다.
pub fn extract_metadata(track: &mut TrackDescriptor) {
    let Some(path) = track.path.clone() else {
        return;
    };

    let guess = parser::guess_from_filename(&path);

    match tagger::read_tags(&path) {
        Some(meta) => {
            track.artist = Some(meta.artist);
            track.name = Some(meta.name);
            track.source = MetadataSource::Id3;
            track.fallback_guess = guess;
        }
        None => match guess {
            Some(meta) => {
                track.artist = Some(meta.artist);
                track.name = Some(meta.name);
                track.source = MetadataSource::Guess;
                track.fallback_guess = None;
            }
            None => {
                track.artist = None;
                track.name = None;
                track.source = MetadataSource::Unresolved;
                track.fallback_guess = None;
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unreadable_file_falls_back_to_guess() {
        let mut track = TrackDescriptor::from_path(PathBuf::from("/missing/Artist - Title.mp3"));
        extract_metadata(&mut track);
        assert_eq!(track.source, MetadataSource::Guess);
        assert_eq!(track.artist.as_deref(), Some("Artist"));
        assert_eq!(track.name.as_deref(), Some("Title"));
        assert!(track.fallback_guess.is_none());
    }

    #[test]
    fn test_no_tags_no_dash_stays_unresolved() {
        let mut track = TrackDescriptor::from_path(PathBuf::from("/missing/NoDash.mp3"));
        extract_metadata(&mut track);
        assert_eq!(track.source, MetadataSource::Unresolved);
        assert!(track.artist.is_none());
        assert!(track.active_meta().is_none());
    }

    #[test]
    fn test_library_track_is_untouched() {
        let mut track = TrackDescriptor::from_library("IU".into(), "Blueming".into());
        extract_metadata(&mut track);
        assert_eq!(track.source, MetadataSource::Itunes);
        assert_eq!(track.artist.as_deref(), Some("IU"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut a = TrackDescriptor::from_path(PathBuf::from("/missing/Artist - Title.mp3"));
        extract_metadata(&mut a);
        let mut b = a.clone();
        extract_metadata(&mut b);
        assert_eq!(a.artist, b.artist);
        assert_eq!(a.name, b.name);
        assert_eq!(a.source, b.source);
        assert_eq!(a.fallback_guess, b.fallback_guess);
    }
}
