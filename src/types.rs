use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The OAuth credential stored for one user.
///
/// Replaced wholesale on refresh. `expires_in` and `obtained_at` are advisory;
/// an expired access token is only discovered when the upstream answers 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub scope: String,
    pub obtained_at: i64,
}

impl Credential {
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Body returned by the token endpoint for both grant types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Turns the response into a credential.
    ///
    /// Returns `None` when no access token was handed out. If the response
    /// carries no refresh token, `previous_refresh_token` is kept: the
    /// provider omits it on refresh to mean "unchanged".
    pub fn into_credential(self, previous_refresh_token: Option<String>) -> Option<Credential> {
        let access_token = self.access_token.filter(|t| !t.trim().is_empty())?;

        Some(Credential {
            access_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: self
                .refresh_token
                .filter(|t| !t.is_empty())
                .or(previous_refresh_token),
            expires_in: self.expires_in.unwrap_or(3600),
            scope: self.scope.unwrap_or_default(),
            obtained_at: Utc::now().timestamp(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub followers: Option<Followers>,
    pub images: Vec<Image>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    pub genres: Vec<String>,
    pub images: Vec<Image>,
    pub external_urls: Option<ExternalUrls>,
    pub href: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub album_type: Option<String>,
    pub total_tracks: Option<u32>,
    pub release_date: Option<String>,
    pub images: Vec<Image>,
    pub artists: Vec<Artist>,
    pub tracks: Option<Paged<Track>>,
    pub genres: Vec<String>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
    pub external_urls: Option<ExternalUrls>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: Option<Album>,
    pub artists: Vec<Artist>,
    pub disc_number: Option<u32>,
    pub duration_ms: u64,
    pub explicit: bool,
    pub is_playable: Option<bool>,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    pub track_number: Option<u32>,
    pub external_urls: Option<ExternalUrls>,
    pub uri: Option<String>,
}

/// Spotify's paging object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
            limit: None,
            offset: None,
            href: None,
            next: None,
            previous: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistTopTracks {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub tracks: Option<Paged<Track>>,
    pub artists: Option<Paged<Artist>>,
    pub albums: Option<Paged<Album>>,
}
