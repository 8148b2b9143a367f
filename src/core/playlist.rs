use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roxmltree::{Document, Node};

use crate::models::TrackDescriptor;

/// 지원하는 플레이리스트 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistFormat {
    M3u,
    /// iTunes 라이브러리 XML 내보내기 (plist)
    LibraryXml,
}

impl PlaylistFormat {
    /// 확장자로 형식을 결정한다 (대소문자 무시). I/O 전에 호출된다.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if ext.eq_ignore_ascii_case("m3u") {
            Ok(PlaylistFormat::M3u)
        } else if ext.eq_ignore_ascii_case("xml") {
            Ok(PlaylistFormat::LibraryXml)
        } else {
            anyhow::bail!("지원하지 않는 파일 확장자입니다: \"{ext}\"")
        }
    }
}

/// 파싱된 플레이리스트. `read_tags`가 참이면 트랙별로
/// ID3 태그 읽기가 이어진다.
#[derive(Debug)]
pub struct LoadedPlaylist {
    pub tracks: Vec<TrackDescriptor>,
    pub read_tags: bool,
}

/// 플레이리스트 파일을 읽어 트랙 목록으로 변환한다.
/// 형식 판별은 I/O 전에 끝나고, 파싱 실패는 파일 경로와 함께 에러가 된다.
pub fn load_playlist(path: &Path) -> Result<LoadedPlaylist> {
    let format = PlaylistFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("플레이리스트 파일을 읽을 수 없습니다: {}", path.display()))?;

    match format {
        PlaylistFormat::M3u => Ok(LoadedPlaylist {
            tracks: parse_m3u(&content),
            read_tags: true,
        }),
        PlaylistFormat::LibraryXml => Ok(LoadedPlaylist {
            tracks: parse_library_xml(&content)
                .with_context(|| format!("플레이리스트 파일 로드 실패: {}", path.display()))?,
            read_tags: false,
        }),
    }
}

/// M3U: 공백 줄과 `#` 주석 줄을 제외한 각 줄이 트랙 경로다.
pub fn parse_m3u(content: &str) -> Vec<TrackDescriptor> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| TrackDescriptor::from_path(PathBuf::from(line)))
        .collect()
}

/// iTunes XML: plist의 `Tracks` dict를 순회하며 각 트랙의
/// `Artist`/`Name`을 가져온다. 없는 필드는 빈 문자열.
pub fn parse_library_xml(content: &str) -> Result<Vec<TrackDescriptor>> {
    let doc = Document::parse(content).context("plist XML 파싱 실패")?;

    let root_dict = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("dict"))
        .context("plist에 최상위 dict가 없습니다")?;

    let tracks_dict = dict_value(root_dict, "Tracks")
        .filter(|n| n.has_tag_name("dict"))
        .context("plist에 Tracks dict가 없습니다")?;

    let mut tracks = Vec::new();
    for (_, track_dict) in dict_entries(tracks_dict) {
        if !track_dict.has_tag_name("dict") {
            continue;
        }
        let artist = string_value(track_dict, "Artist");
        let name = string_value(track_dict, "Name");
        tracks.push(TrackDescriptor::from_library(artist, name));
    }
    Ok(tracks)
}

/// dict 노드의 (key, value) 쌍을 문서 순서대로 돌려준다.
fn dict_entries<'a, 'input>(dict: Node<'a, 'input>) -> Vec<(String, Node<'a, 'input>)> {
    let mut entries = Vec::new();
    let mut children = dict.children().filter(Node::is_element);
    while let Some(key) = children.next() {
        if !key.has_tag_name("key") {
            continue;
        }
        let Some(value) = children.next() else { break };
        entries.push((key.text().unwrap_or_default().to_string(), value));
    }
    entries
}

fn dict_value<'a, 'input>(dict: Node<'a, 'input>, key: &str) -> Option<Node<'a, 'input>> {
    dict_entries(dict)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn string_value(dict: Node, key: &str) -> String {
    dict_value(dict, key)
        .and_then(|n| n.text())
        .unwrap_or_default()
        .to_string()
}
