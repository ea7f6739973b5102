//! Spotify item identifiers.
//!
//! Items are addressed either by a bare base-62 ID or by a service-scoped
//! URI of the form `spotify:<type>:<id>`. Share links
//! (`https://open.spotify.com/<type>/<id>`) are accepted wherever a URI is.

use std::fmt;
use std::str::FromStr;

use crate::error::SpotifyError;

const URI_SCHEME: &str = "spotify";
const OPEN_URL_PREFIX: &str = "https://open.spotify.com/";

/// Length of a canonical base-62 Spotify ID.
pub const ID_LEN: usize = 22;

/// Item type embedded in a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Track,
    Episode,
    Album,
    Artist,
    Playlist,
    Show,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Track => "track",
            ItemKind::Episode => "episode",
            ItemKind::Album => "album",
            ItemKind::Artist => "artist",
            ItemKind::Playlist => "playlist",
            ItemKind::Show => "show",
        }
    }

    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "track" => Some(ItemKind::Track),
            "episode" => Some(ItemKind::Episode),
            "album" => Some(ItemKind::Album),
            "artist" => Some(ItemKind::Artist),
            "playlist" => Some(ItemKind::Playlist),
            "show" => Some(ItemKind::Show),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `spotify:<type>:<id>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyUri {
    kind: ItemKind,
    id: String,
}

impl SpotifyUri {
    pub fn new(kind: ItemKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn from_parts(kind: &str, id: &str, original: &str) -> Result<Self, SpotifyError> {
        let kind = ItemKind::parse(kind).ok_or_else(|| {
            SpotifyError::InvalidId(format!("unsupported item type '{}' in '{}'", kind, original))
        })?;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SpotifyError::InvalidId(format!(
                "malformed item id in '{}'",
                original
            )));
        }
        Ok(Self::new(kind, id))
    }
}

impl FromStr for SpotifyUri {
    type Err = SpotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix(OPEN_URL_PREFIX) {
            let path = rest.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
            let mut segments = path.split('/').filter(|seg| !seg.is_empty());
            // Localised links carry an `intl-xx` segment before the type.
            let mut kind = segments.next().unwrap_or_default();
            if kind.starts_with("intl-") {
                kind = segments.next().unwrap_or_default();
            }
            let id = segments.next().unwrap_or_default();
            return Self::from_parts(kind, id, s);
        }

        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(URI_SCHEME), Some(kind), Some(id), None) => Self::from_parts(kind, id, s),
            _ => Err(SpotifyError::InvalidId(format!(
                "expected 'spotify:<type>:<id>', got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for SpotifyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", URI_SCHEME, self.kind, self.id)
    }
}

/// Normalize an ID-or-URI into a URI of the given kind.
///
/// Bare IDs are wrapped; URIs and share links must already be of `kind`.
pub fn to_uri(kind: ItemKind, id_or_uri: &str) -> Result<SpotifyUri, SpotifyError> {
    let trimmed = id_or_uri.trim();
    if trimmed.contains(':') || trimmed.starts_with(OPEN_URL_PREFIX) {
        let uri: SpotifyUri = trimmed.parse()?;
        if uri.kind() != kind {
            return Err(SpotifyError::InvalidId(format!(
                "expected a {} reference, got a {} URI",
                kind,
                uri.kind()
            )));
        }
        return Ok(uri);
    }
    SpotifyUri::from_parts(kind.as_str(), trimmed, id_or_uri)
}

/// Whether `reference` has the shape of a playlist identifier rather than a
/// human-readable playlist name: the `spotify:playlist:` URI form, or exactly
/// [`ID_LEN`] characters.
pub fn looks_like_playlist_id(reference: &str) -> bool {
    reference.starts_with("spotify:playlist:") || reference.chars().count() == ID_LEN
}
