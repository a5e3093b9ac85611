//! Display-ready episode model.

use serde::Serialize;

use super::duration::duration_as_string;
use crate::utils::html::TrustedHtml;

/// Normalized episode handed to the renderer.
///
/// Immutable once built: the page cache holds it behind an `Arc` and replaces
/// it wholesale on regeneration. `duration_as_string` is derived from
/// `duration` at construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub description: TrustedHtml,
    pub published_at: String,
    duration: u64,
    duration_as_string: String,
    pub url: String,
}

/// Fields copied through unchanged from the API payload.
#[derive(Debug, Clone)]
pub struct PassThrough {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub description: TrustedHtml,
    pub url: String,
}

impl DisplayEpisode {
    pub fn new(fields: PassThrough, published_at: String, duration: u64) -> Self {
        let PassThrough {
            id,
            title,
            members,
            thumbnail,
            description,
            url,
        } = fields;

        Self {
            id,
            title,
            members,
            thumbnail,
            description,
            published_at,
            duration,
            duration_as_string: duration_as_string(duration),
            url,
        }
    }

    /// Duration in whole seconds.
    #[cfg(test)]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Duration as `HH:MM:SS`.
    pub fn duration_as_string(&self) -> &str {
        &self.duration_as_string
    }
}
