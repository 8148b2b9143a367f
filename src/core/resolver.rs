use crate::models::{CatalogMatch, CatalogTrack, Console, TrackDescriptor, TrackMeta};
use crate::sources::CatalogSource;

/// 이 값을 넘어야 매치로 인정한다 (경계값 자체는 탈락).
pub const MATCH_THRESHOLD: f64 = 0.5;

/// 검색 한 번에 가져오는 후보 수.
pub const SEARCH_LIMIT: usize = 30;

/// 두 문자열의 유사도 [0, 1].
///
/// 최장 공통 부분수열(LCS) 기반의 정규화 비율 `2·LCS / (|a|+|b|)`.
/// 대칭이고 결정적이다. 둘 다 빈 문자열이면 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // 두 행만 쓰는 LCS DP
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    let lcs = prev[b.len()];

    2.0 * lcs as f64 / (a.len() + b.len()) as f64
}

/// 검색 결과에서 최선의 후보를 고른다.
///
/// 제목 유사도가 정확히 1.0인 후보가 있으면 카탈로그 순서상 첫 번째가
/// 즉시 선택된다. 아니면 유사도 내림차순(동률은 카탈로그 순서 유지)으로
/// 정렬해 1위가 임계값을 초과할 때만 선택한다.
pub fn select_match(candidates: &[CatalogTrack], wanted_title: &str) -> Option<CatalogMatch> {
    if candidates.is_empty() {
        return None;
    }

    let ranked: Vec<(f64, &CatalogTrack)> = candidates
        .iter()
        .map(|c| (similarity(wanted_title, &c.name), c))
        .collect();

    if let Some((_, exact)) = ranked.iter().copied().find(|(sim, _)| *sim == 1.0) {
        return Some(to_match(exact, 1.0));
    }

    let mut ranked = ranked;
    // sort_by는 안정 정렬이라 동률은 카탈로그 순서를 유지한다
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    let (best_sim, best) = ranked[0];
    if best_sim > MATCH_THRESHOLD {
        Some(to_match(best, best_sim))
    } else {
        None
    }
}

fn to_match(track: &CatalogTrack, sim: f64) -> CatalogMatch {
    CatalogMatch {
        id: track.id.clone(),
        name: track.name.clone(),
        artist: track.artist.clone(),
        similarity: sim,
    }
}

/// 트랙 하나를 카탈로그에서 찾는다.
///
/// 활성 아티스트/제목으로 먼저 검색하고, 실패하면 보관된 파일명 추측으로
/// 한 번 더 시도한다. 검색 에러는 해당 시도의 무결과로 취급하고 넘어간다.
pub fn resolve(
    catalog: &dyn CatalogSource,
    track: &TrackDescriptor,
    console: &Console,
) -> Option<CatalogMatch> {
    let mut attempts: Vec<TrackMeta> = Vec::new();
    if let Some(meta) = track.active_meta() {
        attempts.push(meta);
    }
    if let Some(guess) = &track.fallback_guess {
        attempts.push(guess.clone());
    }

    for meta in attempts {
        let query = format!("{} {}", meta.artist, meta.name);
        console.debug(&format!(
            "Spotify에서 \"{query}\" 검색, 찾는 제목: \"{}\"",
            meta.name
        ));

        let results = match catalog.search(&query, SEARCH_LIMIT) {
            Ok(results) => results,
            Err(e) => {
                console.debug(&format!("검색 실패: {e:#}"));
                continue;
            }
        };
        console.debug(&format!("Spotify 결과: {}건", results.len()));

        if let Some(found) = select_match(&results, &meta.name) {
            console.debug(&format!(
                "매치: {} - {} (유사도 {:.2})",
                found.artist, found.name, found.similarity
            ));
            return Some(found);
        }
        console.debug("쓸 만한 Spotify 결과가 없습니다");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::cell::RefCell;

    fn track(id: &str, name: &str) -> CatalogTrack {
        CatalogTrack {
            id: id.to_string(),
            name: name.to_string(),
            artist: "Artist".to_string(),
        }
    }

    #[test]
    fn test_similarity_known_pairs() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        // LCS("ab", "b") = 1 → 2/3
        assert!((similarity("ab", "b") - 2.0 / 3.0).abs() < 1e-12);
        // LCS("ab", "abxxxx") = 2 → 4/8
        assert_eq!(similarity("ab", "abxxxx"), 0.5);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        assert_eq!(similarity("Blueming", "Bluemin"), similarity("Bluemin", "Blueming"));
    }

    #[test]
    fn test_similarity_empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("a", ""), 0.0);
    }

    #[test]
    fn test_exact_title_wins_regardless_of_position() {
        let candidates = vec![
            track("1", "Blueming (Remix)"),
            track("2", "Bluemin"),
            track("3", "Blueming"),
        ];
        let found = select_match(&candidates, "Blueming").unwrap();
        assert_eq!(found.id, "3");
        assert_eq!(found.similarity, 1.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // similarity("ab", "abxxxx") == 0.5, 경계값은 탈락
        let candidates = vec![track("1", "abxxxx")];
        assert!(select_match(&candidates, "ab").is_none());
    }

    #[test]
    fn test_above_threshold_top_candidate_selected() {
        let candidates = vec![track("1", "completely different"), track("2", "Bluemin")];
        let found = select_match(&candidates, "Blueming").unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // 동일 제목 둘: 먼저 온 후보가 이긴다 (정확 일치 규칙)
        let candidates = vec![track("1", "Blueming"), track("2", "Blueming")];
        assert_eq!(select_match(&candidates, "Blueming").unwrap().id, "1");
    }

    #[test]
    fn test_empty_results_short_circuit() {
        assert!(select_match(&[], "Blueming").is_none());
    }

    struct MockCatalog {
        queries: RefCell<Vec<String>>,
        responses: RefCell<Vec<Result<Vec<CatalogTrack>>>>,
    }

    impl MockCatalog {
        fn new(responses: Vec<Result<Vec<CatalogTrack>>>) -> Self {
            MockCatalog {
                queries: RefCell::new(Vec::new()),
                responses: RefCell::new(responses),
            }
        }
    }

    impl CatalogSource for MockCatalog {
        fn search(&self, query: &str, _limit: usize) -> Result<Vec<CatalogTrack>> {
            self.queries.borrow_mut().push(query.to_string());
            self.responses.borrow_mut().remove(0)
        }
    }

    fn tagged_track_with_guess() -> TrackDescriptor {
        use crate::models::MetadataSource;
        TrackDescriptor {
            path: Some("/music/IU - Blueming.mp3".into()),
            artist: Some("아이유".to_string()),
            name: Some("블루밍".to_string()),
            source: MetadataSource::Id3,
            fallback_guess: Some(TrackMeta {
                artist: "IU".to_string(),
                name: "Blueming".to_string(),
            }),
            catalog_match: None,
        }
    }

    #[test]
    fn test_second_attempt_uses_filename_guess() {
        let catalog = MockCatalog::new(vec![Ok(vec![]), Ok(vec![track("7", "Blueming")])]);
        let found = resolve(&catalog, &tagged_track_with_guess(), &Console::default()).unwrap();
        assert_eq!(found.id, "7");
        assert_eq!(
            *catalog.queries.borrow(),
            vec!["아이유 블루밍".to_string(), "IU Blueming".to_string()]
        );
    }

    #[test]
    fn test_first_attempt_match_stops_there() {
        let catalog = MockCatalog::new(vec![Ok(vec![track("1", "블루밍")])]);
        let found = resolve(&catalog, &tagged_track_with_guess(), &Console::default()).unwrap();
        assert_eq!(found.id, "1");
        assert_eq!(catalog.queries.borrow().len(), 1);
    }

    #[test]
    fn test_search_error_falls_through_to_next_attempt() {
        let catalog = MockCatalog::new(vec![
            Err(anyhow::anyhow!("timeout")),
            Ok(vec![track("7", "Blueming")]),
        ]);
        let found = resolve(&catalog, &tagged_track_with_guess(), &Console::default()).unwrap();
        assert_eq!(found.id, "7");
    }

    #[test]
    fn test_unresolved_track_never_searches() {
        let catalog = MockCatalog::new(vec![]);
        let track = TrackDescriptor::from_path("/music/NoDash.mp3".into());
        assert!(resolve(&catalog, &track, &Console::default()).is_none());
        assert!(catalog.queries.borrow().is_empty());
    }
}
