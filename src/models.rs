use std::path::PathBuf;

/// 트랙 메타데이터의 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataSource {
    /// ID3 태그에서 읽음
    Id3,
    /// 파일명에서 추측함
    Guess,
    /// iTunes 라이브러리 XML에서 가져옴
    Itunes,
    /// 아티스트/제목을 알아내지 못함
    #[default]
    Unresolved,
}

/// 아티스트 + 제목 한 쌍.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMeta {
    pub artist: String,
    pub name: String,
}

/// 카탈로그 검색 결과 한 건 (순위 매기기 전).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
}

/// Spotify 카탈로그에서 선택된 매치. 한번 만들어지면 변경되지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMatch {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub similarity: f64,
}

/// 플레이리스트 항목 하나. 파싱 시점에 생성되고,
/// 메타데이터 추출과 매칭을 거치며 채워진 뒤에는 읽기 전용이다.
#[derive(Debug, Clone, Default)]
pub struct TrackDescriptor {
    pub path: Option<PathBuf>,
    pub artist: Option<String>,
    pub name: Option<String>,
    pub source: MetadataSource,
    /// 태그가 활성 소스일 때 2차 검색용으로 보관하는 파일명 추측.
    pub fallback_guess: Option<TrackMeta>,
    pub catalog_match: Option<CatalogMatch>,
}

impl TrackDescriptor {
    pub fn from_path(path: PathBuf) -> Self {
        TrackDescriptor {
            path: Some(path),
            ..Default::default()
        }
    }

    pub fn from_library(artist: String, name: String) -> Self {
        TrackDescriptor {
            artist: Some(artist),
            name: Some(name),
            source: MetadataSource::Itunes,
            ..Default::default()
        }
    }

    /// 활성 아티스트/제목 쌍. 둘 다 있어야 검색 대상이 된다.
    pub fn active_meta(&self) -> Option<TrackMeta> {
        match (&self.artist, &self.name) {
            (Some(artist), Some(name)) => Some(TrackMeta {
                artist: artist.clone(),
                name: name.clone(),
            }),
            _ => None,
        }
    }

    /// 진단 블록 첫 줄에 쓰는 트랙 식별자.
    pub fn identity(&self) -> String {
        if self.source == MetadataSource::Itunes {
            format!(
                "{} - {}",
                self.artist.as_deref().unwrap_or(""),
                self.name.as_deref().unwrap_or("")
            )
        } else {
            self.path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        }
    }
}

/// 컴포넌트에 명시적으로 전달되는 콘솔 컨텍스트.
/// 전역 로거 대신 이 값이 verbosity를 들고 다닌다.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    pub debug: bool,
}

impl Console {
    pub fn debug(&self, msg: &str) {
        if self.debug {
            eprintln!("[debug] {msg}");
        }
    }

    pub fn critical(&self, msg: &str) {
        eprintln!("[critical] {msg}");
    }
}
