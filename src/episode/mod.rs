//! Episode normalization: raw API payload -> display model.
//!
//! | Module     | Purpose                                     |
//! |------------|---------------------------------------------|
//! | `date`     | ISO-8601 parsing, localized `d MMM yy`      |
//! | `display`  | `DisplayEpisode` (immutable, serializable)  |
//! | `duration` | Numeric coercion and `HH:MM:SS` formatting  |

mod date;
mod display;
mod duration;

pub use date::Locale;
pub use display::{DisplayEpisode, PassThrough};
pub use duration::RawDuration;

use crate::api::RawEpisode;
use crate::utils::html::TrustedHtml;
use thiserror::Error;

/// Data-shape failures found while normalizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("malformed published_at: {0:?}")]
    MalformedDate(String),

    #[error("malformed duration: {0}")]
    MalformedDuration(String),
}

/// Map a raw API episode into the display model.
///
/// Pure: the output depends only on `raw` and `locale`. Either every field is
/// produced or an error is returned.
pub fn normalize(raw: &RawEpisode, locale: Locale) -> Result<DisplayEpisode, NormalizeError> {
    let published = date::parse_published_at(&raw.published_at)?;
    let duration = raw.file.duration.to_seconds()?;

    let fields = PassThrough {
        id: raw.id.clone(),
        title: raw.title.clone(),
        members: raw.members.clone(),
        thumbnail: raw.thumbnail.clone(),
        // Upstream markup is rendered as-is
        description: TrustedHtml::trust(raw.description.clone()),
        url: raw.file.url.clone(),
    };

    Ok(DisplayEpisode::new(
        fields,
        date::format_published_at(&published, locale),
        duration,
    ))
}

#[cfg(test)]
pub(crate) fn sample_raw() -> RawEpisode {
    serde_json::from_str(
        r#"{
            "id": "e1",
            "title": "Ep 1",
            "members": "A, B",
            "thumbnail": "http://x/img.png",
            "published_at": "2021-05-10T00:00:00Z",
            "description": "<p>hi</p>",
            "file": { "duration": "125", "url": "http://x/audio.mp3" }
        }"#,
    )
    .unwrap()
}
