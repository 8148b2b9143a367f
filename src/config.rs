use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Spotify 자격증명. 환경 변수가 우선하고, 없으면
/// `~/.config/playlist2spotify/config.toml`에서 읽는다.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    spotify: SpotifyConfig,
}

/// 검증이 끝난 자격증명 세트. 네트워크 작업 전에 확보된다.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("playlist2spotify")
        .join("config.toml")
}

fn load_config_file() -> SpotifyConfig {
    let path = config_path();
    if !path.exists() {
        return SpotifyConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str::<ConfigFile>(&content)
            .map(|c| c.spotify)
            .unwrap_or_default(),
        Err(_) => SpotifyConfig::default(),
    }
}

fn env_or(fallback: &Option<String>, var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.clone().filter(|v| !v.is_empty()))
}

/// 자격증명을 로드한다. 세 값 중 하나라도 없으면 에러.
pub fn load_credentials() -> Result<Credentials> {
    let file = load_config_file();

    let client_id = env_or(&file.client_id, "SPOTIFY_CLIENT_ID")
        .context("SPOTIFY_CLIENT_ID가 설정되지 않았습니다")?;
    let client_secret = env_or(&file.client_secret, "SPOTIFY_CLIENT_SECRET")
        .context("SPOTIFY_CLIENT_SECRET가 설정되지 않았습니다")?;
    let redirect_uri = env_or(&file.redirect_uri, "SPOTIFY_REDIRECT_URI")
        .context("SPOTIFY_REDIRECT_URI가 설정되지 않았습니다")?;

    Ok(Credentials {
        client_id,
        client_secret,
        redirect_uri,
    })
}
