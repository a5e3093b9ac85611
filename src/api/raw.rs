use serde::{Deserialize, Serialize};

use crate::episode::RawDuration;

/// Episode as returned by `GET /episodes/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    pub published_at: String,
    pub description: String,
    pub file: RawFile,
}

/// Media file descriptor nested in [`RawEpisode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFile {
    pub duration: RawDuration,
    pub url: String,
}
