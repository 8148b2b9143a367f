use anyhow::{Context, Result};

use crate::sources::PlaylistTarget;

/// API의 호출당 추가 한도.
pub const ADD_BATCH_SIZE: usize = 100;

/// 매치된 트랙 ID들로 비공개 플레이리스트를 만든다.
///
/// ID 목록이 비어 있으면 호출하지 않는 것이 호출자 책임이다.
/// 트랙은 원본 순서 그대로, 한 번에 최대 100개씩 추가한다.
/// 생성이나 추가가 실패하면 남은 배치를 버리고 에러를 돌려준다 (롤백 없음).
pub fn publish(
    target: &dyn PlaylistTarget,
    owner: &str,
    name: &str,
    track_ids: &[String],
) -> Result<String> {
    if track_ids.is_empty() {
        anyhow::bail!("추가할 트랙이 없어 플레이리스트를 만들지 않습니다");
    }

    let playlist_id = target
        .create_playlist(owner, name)
        .with_context(|| format!("플레이리스트 \"{name}\" 생성 실패"))?;

    for batch in track_ids.chunks(ADD_BATCH_SIZE) {
        target
            .add_tracks(&playlist_id, batch)
            .with_context(|| format!("플레이리스트 \"{name}\"에 트랙 추가 실패"))?;
    }

    Ok(playlist_id)
}
