use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config;
use crate::core::{extractor, playlist, publisher, resolver};
use crate::models::Console;
use crate::report;
use crate::sources::spotify::{SpotifyClient, SpotifyUserClient};

#[derive(Parser)]
#[command(
    name = "playlist2spotify",
    about = "M3U 플레이리스트나 iTunes 라이브러리를 Spotify 플레이리스트로 가져온다"
)]
pub struct Cli {
    /// M3U 플레이리스트 또는 iTunes XML 파일 경로
    #[arg(short, long)]
    pub file: PathBuf,

    /// Spotify 사용자 이름
    #[arg(short, long)]
    pub username: String,

    /// 디버그 출력
    #[arg(short, long)]
    pub debug: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    let console = Console { debug: cli.debug };

    // 네트워크 작업 전에 자격증명부터 확인한다
    let credentials = config::load_credentials()?;
    let catalog = SpotifyClient::new(&credentials)?;

    let loaded = playlist::load_playlist(&cli.file)?;
    let mut tracks = loaded.tracks;

    println!(
        "{}에서 트랙 {}개를 읽었습니다",
        cli.file.display(),
        tracks.len()
    );

    for track in &mut tracks {
        if loaded.read_tags {
            extractor::extract_metadata(track);
        }
        track.catalog_match = resolver::resolve(&catalog, track, &console);
        println!("\n{}", report::format_track(track));
    }

    println!("\n{}", report::summary_table(&tracks));

    let matched_ids: Vec<String> = tracks
        .iter()
        .filter_map(|t| t.catalog_match.as_ref())
        .map(|m| m.id.clone())
        .collect();

    if matched_ids.is_empty() {
        anyhow::bail!("Spotify에서 일치하는 트랙을 찾지 못했습니다");
    }

    let playlist_name = cli
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("playlist")
        .to_string();

    println!(
        "\n트랙 {}/{}개가 매치되었습니다. Spotify에 \"{playlist_name}\" 플레이리스트를 만듭니다...",
        matched_ids.len(),
        tracks.len()
    );

    let target = SpotifyUserClient::authorize(&credentials)?;

    if let Err(e) = publisher::publish(&target, &cli.username, &playlist_name, &matched_ids) {
        console.critical(&format!("Spotify 오류: {e:#}"));
        anyhow::bail!("플레이리스트 게시에 실패했습니다");
    }

    println!("완료\n");
    Ok(())
}
