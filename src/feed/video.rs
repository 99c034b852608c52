// SPDX-License-Identifier: MPL-2.0
//! Feed item model and playable URL resolution.

use crate::config::defaults::DEFAULT_AUTHOR_NAME;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Preferred renditions, best first.
pub const RENDITION_PREFERENCE: [&str; 3] = ["720p", "480p", "360p"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    /// Name shown on the overlay.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_AUTHOR_NAME)
    }
}

/// A video as delivered by the feed API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub author: Author,
    pub r2_object_key: String,
    #[serde(default)]
    pub original_url: Option<String>,
    /// Storage keys of transcoded renditions, keyed by label ("720p", ...).
    #[serde(default)]
    pub compressed_paths: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub is_liked: bool,
}

impl Video {
    /// Storage key of the best available rendition, falling back to the
    /// original upload.
    #[must_use]
    pub fn preferred_key(&self) -> &str {
        self.compressed_paths
            .as_ref()
            .and_then(|paths| {
                RENDITION_PREFERENCE
                    .iter()
                    .find_map(|label| paths.get(*label).filter(|key| !key.is_empty()))
            })
            .map_or(self.r2_object_key.as_str(), String::as_str)
    }

    /// Public URL to stream this video from, `None` without a domain.
    #[must_use]
    pub fn playable_url(&self, public_domain: &str) -> Option<String> {
        let domain = public_domain.trim().trim_end_matches('/');
        if domain.is_empty() {
            return None;
        }
        let key = self.preferred_key().trim_start_matches('/');
        Some(format!("{domain}/{key}"))
    }

    /// Source link of the video, made absolute.
    #[must_use]
    pub fn external_link(&self) -> Option<String> {
        let url = self.original_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            Some(url.to_string())
        } else {
            Some(format!("https://{url}"))
        }
    }
}
