//! Link construction for tool cards.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_BASE: &str = "https://github.com/theonlyasdk/electronics-toolkit";
pub const DEFAULT_TOOL_BASE_URL: &str = "http://127.0.0.1:8080";

/// How the hosted-tool link is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BaseUrlMode {
    /// `tool_base_url` joined with the entry url
    #[default]
    Absolute,
    /// The entry url as-is, resolved by the browser against the page
    Relative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    /// Repository base for "View on GitHub" links
    pub source_base: String,
    /// Deployment base for "Open Tool" links in absolute mode
    pub tool_base_url: String,
    pub base_url_mode: BaseUrlMode,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            source_base: DEFAULT_SOURCE_BASE.to_string(),
            tool_base_url: DEFAULT_TOOL_BASE_URL.to_string(),
            base_url_mode: BaseUrlMode::default(),
        }
    }
}

impl LinkPolicy {
    pub fn source_link(&self, url: &str) -> String {
        join(&self.source_base, url)
    }

    pub fn tool_link(&self, url: &str) -> String {
        match self.base_url_mode {
            BaseUrlMode::Absolute => join(&self.tool_base_url, url),
            BaseUrlMode::Relative => url.to_string(),
        }
    }
}

/// `base + "/" + path` without doubling a trailing slash on the base. The
/// path itself is not touched.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.strip_suffix('/').unwrap_or(base), path)
}
