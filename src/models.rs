//! Data models for the YTS Movie Browser

use serde::{Deserialize, Serialize};

/// UI Tab selection
#[derive(Debug, Clone, PartialEq)]
pub enum Tab {
    Browse,
    Favorites,
    Console,
}

/// One movie as the catalog reports it. Read-only on the client side;
/// favorite membership is tracked outside the record.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub imdb_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_english: String,
    #[serde(default)]
    pub title_long: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub runtime: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description_full: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub yt_trailer_code: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub mpa_rating: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub background_image: String,
    #[serde(default)]
    pub background_image_original: String,
    #[serde(default)]
    pub small_cover_image: String,
    #[serde(default)]
    pub medium_cover_image: String,
    #[serde(default)]
    pub large_cover_image: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub torrents: Vec<Torrent>,
    #[serde(default)]
    pub date_uploaded: String,
    #[serde(default)]
    pub date_uploaded_unix: i64,
}

impl Movie {
    /// Best plot text available: full description, then summary, then synopsis.
    pub fn plot(&self) -> &str {
        if !self.description_full.is_empty() {
            &self.description_full
        } else if !self.summary.is_empty() {
            &self.summary
        } else {
            &self.synopsis
        }
    }
}

/// One release variant of a movie
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Torrent {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub quality: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub video_codec: String,
    #[serde(default)]
    pub bit_depth: String,
    #[serde(default)]
    pub audio_channels: String,
    #[serde(default)]
    pub seeds: i64,
    #[serde(default)]
    pub peers: i64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub date_uploaded: String,
    #[serde(default)]
    pub date_uploaded_unix: i64,
}
