use anyhow::{Context, Result};
use base64::Engine;
use dialoguer::Input;
use serde::Deserialize;
use serde_json::json;

use crate::config::Credentials;
use crate::models::CatalogTrack;
use crate::sources::{CatalogSource, PlaylistTarget};

const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const ACCOUNTS_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const API_BASE: &str = "https://api.spotify.com/v1";

/// 검색 전용 클라이언트. 앱 자격증명(client credentials)만 쓴다.
pub struct SpotifyClient {
    client: reqwest::blocking::Client,
    access_token: String,
}

/// 플레이리스트 생성/추가 클라이언트.
/// 사용자 동의(authorization code) 토큰으로만 동작한다.
pub struct SpotifyUserClient {
    client: reqwest::blocking::Client,
    access_token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: TracksResult,
}

#[derive(Deserialize)]
struct TracksResult {
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    artists: Vec<SpotifyArtist>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Deserialize)]
struct CreatedPlaylist {
    id: String,
}

fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    let encoded = base64::engine::general_purpose::STANDARD.encode(pair);
    format!("Basic {encoded}")
}

fn request_token(
    client: &reqwest::blocking::Client,
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<String> {
    let resp: TokenResponse = client
        .post(ACCOUNTS_TOKEN_URL)
        .header("Authorization", basic_auth_header(credentials))
        .form(form)
        .send()
        .context("Spotify 연결에 실패했습니다")?
        .error_for_status()
        .context("Spotify 인증에 실패했습니다. client_id와 client_secret를 확인하세요.")?
        .json()
        .context("Spotify 토큰 응답 파싱에 실패했습니다")?;

    Ok(resp.access_token)
}

impl SpotifyClient {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let client = reqwest::blocking::Client::new();
        let access_token =
            request_token(&client, credentials, &[("grant_type", "client_credentials")])?;
        Ok(Self {
            client,
            access_token,
        })
    }
}

impl CatalogSource for SpotifyClient {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogTrack>> {
        let limit = limit.to_string();
        let resp: SearchResponse = self
            .client
            .get(format!("{API_BASE}/search"))
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("type", "track"), ("limit", &limit)])
            .send()
            .context("Spotify 검색에 실패했습니다")?
            .error_for_status()
            .context("Spotify 검색 요청이 실패했습니다")?
            .json()
            .context("Spotify 검색 응답 파싱에 실패했습니다")?;

        let results = resp
            .tracks
            .items
            .into_iter()
            .map(|track| CatalogTrack {
                id: track.id,
                name: track.name,
                artist: track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(results)
    }
}

impl SpotifyUserClient {
    /// 동의 URL을 안내하고, 리디렉션된 URL(또는 code)을 입력받아
    /// 사용자 토큰을 발급받는다.
    pub fn authorize(credentials: &Credentials) -> Result<Self> {
        let authorize_url = format!(
            "{ACCOUNTS_AUTHORIZE_URL}?response_type=code&client_id={}&scope=playlist-modify-private&redirect_uri={}",
            credentials.client_id, credentials.redirect_uri
        );

        println!("\n브라우저에서 다음 URL을 열어 접근을 허용하세요:");
        println!("{authorize_url}");

        let pasted: String = Input::new()
            .with_prompt("리디렉션된 URL(또는 code 값)을 붙여넣으세요")
            .interact_text()
            .context("동의 코드를 입력받지 못했습니다")?;

        let code =
            extract_consent_code(&pasted).context("입력에서 code 값을 찾을 수 없습니다")?;

        let client = reqwest::blocking::Client::new();
        let access_token = request_token(
            &client,
            credentials,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &credentials.redirect_uri),
            ],
        )?;

        Ok(Self {
            client,
            access_token,
        })
    }
}

impl PlaylistTarget for SpotifyUserClient {
    fn create_playlist(&self, owner: &str, name: &str) -> Result<String> {
        let resp: CreatedPlaylist = self
            .client
            .post(format!("{API_BASE}/users/{owner}/playlists"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "name": name, "public": false }))
            .send()
            .context("플레이리스트 생성 요청에 실패했습니다")?
            .error_for_status()
            .context("플레이리스트 생성이 거부되었습니다")?
            .json()
            .context("플레이리스트 생성 응답 파싱에 실패했습니다")?;

        Ok(resp.id)
    }

    fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<()> {
        let uris: Vec<String> = ids.iter().map(|id| format!("spotify:track:{id}")).collect();

        self.client
            .post(format!("{API_BASE}/playlists/{playlist_id}/tracks"))
            .bearer_auth(&self.access_token)
            .json(&json!({ "uris": uris }))
            .send()
            .context("트랙 추가 요청에 실패했습니다")?
            .error_for_status()
            .context("트랙 추가가 거부되었습니다")?;

        Ok(())
    }
}

/// 붙여넣은 리디렉션 URL이나 순수 code 문자열에서 code 값을 꺼낸다.
fn extract_consent_code(input: &str) -> Option<&str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.find("code=") {
        Some(pos) => {
            let code = &input[pos + "code=".len()..];
            let code = code.split('&').next().unwrap_or(code);
            (!code.is_empty()).then_some(code)
        }
        // URL이 아니면 입력 전체를 code로 본다
        None if !input.contains("://") => Some(input),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code_from_redirect_url() {
        let url = "https://localhost:8888/callback?code=AQDnq&state=x";
        assert_eq!(extract_consent_code(url), Some("AQDnq"));
    }

    #[test]
    fn test_extract_bare_code() {
        assert_eq!(extract_consent_code("  AQDnq  "), Some("AQDnq"));
    }

    #[test]
    fn test_extract_rejects_url_without_code() {
        assert_eq!(extract_consent_code("https://localhost/callback?error=denied"), None);
        assert_eq!(extract_consent_code(""), None);
    }
}
