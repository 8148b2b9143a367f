use comfy_table::Table;

use crate::models::{MetadataSource, TrackDescriptor};

/// 트랙 하나의 진단 블록 4줄. 상태를 건드리지 않는다.
pub fn format_track(track: &TrackDescriptor) -> String {
    let id3_line = if track.source == MetadataSource::Id3 {
        format!(
            "{:?} - {:?}",
            track.artist.as_deref().unwrap_or(""),
            track.name.as_deref().unwrap_or("")
        )
    } else {
        "없음".to_string()
    };

    let guess_line = match track.source {
        MetadataSource::Id3 => "필요 없음".to_string(),
        MetadataSource::Guess => format!(
            "{:?} - {:?}",
            track.artist.as_deref().unwrap_or(""),
            track.name.as_deref().unwrap_or("")
        ),
        _ => "없음".to_string(),
    };

    let spotify_line = match &track.catalog_match {
        Some(found) => format!("{:?} - {:?}, {:?}", found.artist, found.name, found.id),
        None => "없음".to_string(),
    };

    format!(
        "{}\nID3 태그: {}\n파일명 추측: {}\nSpotify: {}",
        track.identity(),
        id3_line,
        guess_line,
        spotify_line
    )
}

fn source_label(source: MetadataSource) -> &'static str {
    match source {
        MetadataSource::Id3 => "ID3",
        MetadataSource::Guess => "파일명",
        MetadataSource::Itunes => "iTunes",
        MetadataSource::Unresolved => "-",
    }
}

/// 전체 트랙의 매칭 결과 요약 테이블.
pub fn summary_table(tracks: &[TrackDescriptor]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["트랙", "소스", "Spotify"]);

    for track in tracks {
        let matched = match &track.catalog_match {
            Some(found) => format!("{} - {}", found.artist, found.name),
            None => "-".to_string(),
        };
        table.add_row(vec![
            track.identity(),
            source_label(track.source).to_string(),
            matched,
        ]);
    }

    table
}
