pub mod spotify;

use anyhow::Result;

use crate::models::CatalogTrack;

/// 트랙 검색용 카탈로그 추상화.
/// 앱 자격증명만으로 동작하는 읽기 전용 세션이다.
pub trait CatalogSource {
    /// 쿼리 문자열로 트랙을 검색한다. 결과는 카탈로그가 준 순서 그대로.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>>;
}

/// 플레이리스트 생성 대상 추상화.
/// 사용자 동의 토큰이 필요한 별도의 세션으로, 검색 세션과 섞지 않는다.
pub trait PlaylistTarget {
    /// 비공개 플레이리스트를 만들고 그 ID를 돌려준다.
    fn create_playlist(&self, owner: &str, name: &str) -> Result<String>;
    /// 트랙 ID 묶음 하나를 플레이리스트에 추가한다.
    fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<()>;
}
