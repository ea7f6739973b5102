//! Spotify Web API client over `reqwest`.
//!
//! Authenticates with a pre-issued bearer token. Upstream payloads are
//! condensed into compact summaries before they reach the tool layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::uri::{self, ItemKind, SpotifyUri};
use super::{PlaylistDetails, SpotifyClient};
use crate::error::SpotifyError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Page size used when walking the caller's playlists.
const PLAYLIST_PAGE_SIZE: u32 = 50;

/// Albums listed for an artist lookup.
const ARTIST_ALBUM_LIMIT: u32 = 20;

pub struct WebApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    market: Option<String>,
}

impl WebApiClient {
    pub fn new(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        market: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SpotifyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spotify-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            market,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.access_token)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, SpotifyError> {
        let response = builder.send().await?;
        check_status(response).await
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SpotifyError> {
        debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json().await?)
    }

    /// Player commands answer with an empty body on success.
    async fn player_command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), SpotifyError> {
        debug!(path, %method, "player command");
        let mut builder = self.request(method, path);
        builder = match body {
            Some(body) => builder.json(&body),
            // The Web API rejects body-less PUT/POST without a length header.
            None => builder.header(reqwest::header::CONTENT_LENGTH, 0),
        };
        self.send(builder).await?;
        Ok(())
    }

    fn market_query(&self) -> Vec<(&'static str, String)> {
        self.market
            .iter()
            .map(|market| ("market", market.clone()))
            .collect()
    }

    async fn artist_info(&self, artist: &SpotifyUri) -> Result<Value, SpotifyError> {
        let id = artist.id();
        let info = self.get_json(&format!("/artists/{}", id), &[]).await?;
        let market = self.market.clone().unwrap_or_else(|| "from_token".to_string());
        let top_tracks = self
            .get_json(&format!("/artists/{}/top-tracks", id), &[("market", market)])
            .await?;
        let albums = self
            .get_json(
                &format!("/artists/{}/albums", id),
                &[("limit", ARTIST_ALBUM_LIMIT.to_string())],
            )
            .await?;

        Ok(json!({
            "artist": summarize_artist(&info),
            "top_tracks": summarize_list(&top_tracks["tracks"], summarize_track),
            "albums": summarize_list(&albums["items"], summarize_album),
        }))
    }
}

async fn check_status(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });

    Err(match status {
        StatusCode::UNAUTHORIZED => SpotifyError::Unauthorized(message),
        StatusCode::NOT_FOUND => SpotifyError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited {
            retry_after: retry_after.unwrap_or(1),
        },
        _ => SpotifyError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Web API errors look like `{"error": {"status": 404, "message": "..."}}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match &value["error"] {
        Value::Object(err) => err.get("message")?.as_str().map(str::to_string),
        Value::String(msg) => Some(msg.clone()),
        _ => None,
    }
}

fn artist_names(item: &Value) -> Vec<Value> {
    item["artists"]
        .as_array()
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| a["name"].as_str())
                .map(|name| Value::String(name.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn pick(item: &Value, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            item.get(*key)
                .filter(|v| !v.is_null())
                .map(|v| (key.to_string(), v.clone()))
        })
        .collect()
}

fn summarize_track(item: &Value) -> Value {
    let mut summary = pick(item, &["name", "id", "uri", "duration_ms", "is_playable"]);
    summary.insert("artists".into(), Value::Array(artist_names(item)));
    if let Some(album) = item["album"]["name"].as_str() {
        summary.insert("album".into(), Value::String(album.to_string()));
    }
    // Episodes carry their show instead of an album.
    if let Some(show) = item["show"]["name"].as_str() {
        summary.insert("show".into(), Value::String(show.to_string()));
    }
    Value::Object(summary)
}

fn summarize_album(item: &Value) -> Value {
    let mut summary = pick(
        item,
        &["name", "id", "uri", "release_date", "total_tracks", "album_type"],
    );
    summary.insert("artists".into(), Value::Array(artist_names(item)));
    Value::Object(summary)
}

fn summarize_artist(item: &Value) -> Value {
    let mut summary = pick(item, &["name", "id", "uri", "genres", "popularity"]);
    if let Some(followers) = item["followers"]["total"].as_u64() {
        summary.insert("followers".into(), json!(followers));
    }
    Value::Object(summary)
}

fn summarize_playlist(item: &Value) -> Value {
    let mut summary = pick(item, &["name", "id", "uri", "description", "public"]);
    if let Some(owner) = item["owner"]["display_name"].as_str() {
        summary.insert("owner".into(), Value::String(owner.to_string()));
    }
    if let Some(total) = item["tracks"]["total"].as_u64() {
        summary.insert("total_tracks".into(), json!(total));
    }
    Value::Object(summary)
}

fn summarize_show(item: &Value) -> Value {
    Value::Object(pick(
        item,
        &["name", "id", "uri", "publisher", "description", "total_episodes"],
    ))
}

/// Summaries of every non-null element of `items`.
fn summarize_list(items: &Value, summarize: fn(&Value) -> Value) -> Value {
    Value::Array(
        items
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(summarize)
                    .collect()
            })
            .unwrap_or_default(),
    )
}

fn summarize_search(results: &Value) -> Value {
    let mut condensed = Map::new();
    let categories: [(&str, fn(&Value) -> Value); 6] = [
        ("tracks", summarize_track),
        ("albums", summarize_album),
        ("artists", summarize_artist),
        ("playlists", summarize_playlist),
        ("shows", summarize_show),
        ("episodes", summarize_track),
    ];
    for (category, summarize) in categories {
        if let Some(page) = results.get(category) {
            condensed.insert(category.to_string(), summarize_list(&page["items"], summarize));
        }
    }
    Value::Object(condensed)
}

#[async_trait]
impl SpotifyClient for WebApiClient {
    async fn get_currently_playing(&self) -> Result<Option<Value>, SpotifyError> {
        let response = self
            .send(
                self.request(Method::GET, "/me/player/currently-playing")
                    .query(&[("additional_types", "track,episode")]),
            )
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let playback: Value = response.json().await?;
        if playback["item"].is_null() {
            return Ok(None);
        }

        let mut current = match summarize_track(&playback["item"]) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        current.extend(pick(&playback, &["is_playing", "progress_ms"]));
        Ok(Some(Value::Object(current)))
    }

    async fn start_playback(&self, uri: Option<&str>) -> Result<(), SpotifyError> {
        let body = match uri {
            None => None,
            Some(uri) => {
                let parsed: SpotifyUri = uri.parse()?;
                Some(match parsed.kind() {
                    ItemKind::Track | ItemKind::Episode => json!({ "uris": [parsed.to_string()] }),
                    _ => json!({ "context_uri": parsed.to_string() }),
                })
            }
        };
        self.player_command(Method::PUT, "/me/player/play", body).await
    }

    async fn pause_playback(&self) -> Result<(), SpotifyError> {
        self.player_command(Method::PUT, "/me/player/pause", None)
            .await
    }

    async fn skip_tracks(&self, count: u32) -> Result<(), SpotifyError> {
        for _ in 0..count {
            self.player_command(Method::POST, "/me/player/next", None)
                .await?;
        }
        Ok(())
    }

    async fn search(&self, query: &str, types: &str, limit: u32) -> Result<Value, SpotifyError> {
        let mut params = vec![
            ("q", query.to_string()),
            ("type", types.to_string()),
            ("limit", limit.to_string()),
        ];
        params.extend(self.market_query());
        let results = self.get_json("/search", &params).await?;
        Ok(summarize_search(&results))
    }

    async fn add_to_queue(&self, track_id: &str) -> Result<(), SpotifyError> {
        let track = uri::to_uri(ItemKind::Track, track_id)?;
        self.send(
            self.request(Method::POST, "/me/player/queue")
                .query(&[("uri", track.to_string())])
                .header(reqwest::header::CONTENT_LENGTH, 0),
        )
        .await?;
        Ok(())
    }

    async fn get_queue(&self) -> Result<Value, SpotifyError> {
        let queue = self.get_json("/me/player/queue", &[]).await?;
        let currently_playing = if queue["currently_playing"].is_null() {
            Value::Null
        } else {
            summarize_track(&queue["currently_playing"])
        };
        Ok(json!({
            "currently_playing": currently_playing,
            "queue": summarize_list(&queue["queue"], summarize_track),
        }))
    }

    async fn get_item_info(&self, item_uri: &str) -> Result<Value, SpotifyError> {
        let item: SpotifyUri = item_uri.parse()?;
        let market = self.market_query();
        match item.kind() {
            ItemKind::Track => {
                let track = self
                    .get_json(&format!("/tracks/{}", item.id()), &market)
                    .await?;
                Ok(summarize_track(&track))
            }
            ItemKind::Episode => {
                let episode = self
                    .get_json(&format!("/episodes/{}", item.id()), &market)
                    .await?;
                Ok(summarize_track(&episode))
            }
            ItemKind::Album => {
                let album = self
                    .get_json(&format!("/albums/{}", item.id()), &market)
                    .await?;
                let mut info = match summarize_album(&album) {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                info.insert(
                    "tracks".into(),
                    summarize_list(&album["tracks"]["items"], summarize_track),
                );
                Ok(Value::Object(info))
            }
            ItemKind::Playlist => {
                let playlist = self
                    .get_json(&format!("/playlists/{}", item.id()), &market)
                    .await?;
                let tracks: Vec<Value> = playlist["tracks"]["items"]
                    .as_array()
                    .map(|entries| {
                        entries
                            .iter()
                            .map(|entry| &entry["track"])
                            .filter(|track| !track.is_null())
                            .map(summarize_track)
                            .collect()
                    })
                    .unwrap_or_default();
                let mut info = match summarize_playlist(&playlist) {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                info.insert("tracks".into(), Value::Array(tracks));
                Ok(Value::Object(info))
            }
            ItemKind::Artist => self.artist_info(&item).await,
            ItemKind::Show => {
                let show = self
                    .get_json(&format!("/shows/{}", item.id()), &market)
                    .await?;
                let mut info = match summarize_show(&show) {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                info.insert(
                    "episodes".into(),
                    summarize_list(&show["episodes"]["items"], summarize_track),
                );
                Ok(Value::Object(info))
            }
        }
    }

    async fn get_top_items(
        &self,
        item_type: &str,
        time_range: &str,
        limit: u32,
    ) -> Result<Value, SpotifyError> {
        let page = self
            .get_json(
                &format!("/me/top/{}", item_type),
                &[
                    ("time_range", time_range.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        let summarize: fn(&Value) -> Value = if item_type == "tracks" {
            summarize_track
        } else {
            summarize_artist
        };
        Ok(summarize_list(&page["items"], summarize))
    }

    async fn create_playlist(&self, details: &PlaylistDetails) -> Result<Value, SpotifyError> {
        let me = self.get_json("/me", &[]).await?;
        let user_id = me["id"]
            .as_str()
            .ok_or_else(|| SpotifyError::Decode("current user has no id".into()))?;

        let body = json!({
            "name": details.name,
            "public": details.public,
            "collaborative": details.collaborative,
            "description": details.description.clone().unwrap_or_default(),
        });
        let response = self
            .send(
                self.request(Method::POST, &format!("/users/{}/playlists", user_id))
                    .json(&body),
            )
            .await?;
        let created: Value = response.json().await?;
        Ok(summarize_playlist(&created))
    }

    async fn resolve_playlist_by_name(&self, name: &str) -> Result<Option<String>, SpotifyError> {
        let mut offset = 0;
        loop {
            let page = self
                .get_json(
                    "/me/playlists",
                    &[
                        ("limit", PLAYLIST_PAGE_SIZE.to_string()),
                        ("offset", offset.to_string()),
                    ],
                )
                .await?;
            let items = page["items"].as_array().cloned().unwrap_or_default();
            let found = items
                .iter()
                .find(|playlist| playlist["name"].as_str() == Some(name))
                .and_then(|playlist| playlist["id"].as_str())
                .map(str::to_string);
            if found.is_some() {
                return Ok(found);
            }
            if page["next"].is_null() || items.is_empty() {
                return Ok(None);
            }
            offset += PLAYLIST_PAGE_SIZE;
        }
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<Value, SpotifyError> {
        let playlist = uri::to_uri(ItemKind::Playlist, playlist_id)?;
        let track = uri::to_uri(ItemKind::Track, track_uri)?;
        let response = self
            .send(
                self.request(Method::POST, &format!("/playlists/{}/tracks", playlist.id()))
                    .json(&json!({ "uris": [track.to_string()] })),
            )
            .await?;
        Ok(response.json().await?)
    }
}
