//! Remote episode API: payload shape and client.

mod fetch;
mod raw;

pub use fetch::{ApiClient, EpisodeSource, FetchError};
pub use raw::RawEpisode;
