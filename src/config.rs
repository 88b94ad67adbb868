//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_true")]
    pub enable_genre_filter: bool,
    #[serde(default = "default_true")]
    pub enable_load_more: bool,
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
}

fn default_true() -> bool { true }
fn default_page_size() -> u32 { 20 }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            page_size: 20,
            enable_genre_filter: true,
            enable_load_more: true,
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("yts_browser");
    fs::create_dir_all(&path).ok();
    path
}

impl AppConfig {
    fn config_path() -> PathBuf {
        let mut path = config_dir();
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
            }
        }

        Self::default()
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Ok(content) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }
}
