use std::path::Path;

use id3::{Tag, TagLike};

use crate::models::TrackMeta;

/// 파일에서 ID3 태그를 읽어 아티스트/제목 쌍으로 변환한다.
/// 파일이 없거나 태그가 깨졌거나 필드가 비어 있으면 None.
/// 어떤 경우에도 에러를 전파하지 않는다.
pub fn read_tags(path: &Path) -> Option<TrackMeta> {
    let tag = Tag::read_from_path(path).ok()?;

    let artist = tag.artist().map(str::trim).filter(|s| !s.is_empty())?;
    let name = tag.title().map(str::trim).filter(|s| !s.is_empty())?;

    Some(TrackMeta {
        artist: artist.to_string(),
        name: name.to_string(),
    })
}
