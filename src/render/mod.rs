//! HTML rendering and the fixed presentation assets.
//!
//! | Module     | Purpose                                   |
//! |------------|-------------------------------------------|
//! | `template` | `__NAME__` placeholder templates          |
//! | `view`     | Loading / Ready episode pages             |
//! | `style`    | `/global.css` from theme tokens           |

mod style;
mod template;
mod view;

pub use view::{EpisodeView, READY_HEADER, RenderContext};

/// A fixed file served at a root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAsset {
    /// URL path, also the file name in a static export.
    pub path: &'static str,
    pub body: &'static str,
}

pub const ARROW_LEFT_SVG: StaticAsset = StaticAsset {
    path: "/arrow-left.svg",
    body: include_str!("icons/arrow-left.svg"),
};

pub const PLAY_SVG: StaticAsset = StaticAsset {
    path: "/play.svg",
    body: include_str!("icons/play.svg"),
};

/// URL path of the generated stylesheet.
pub const STYLESHEET_PATH: &str = "/global.css";

pub static ICONS: [StaticAsset; 2] = [ARROW_LEFT_SVG, PLAY_SVG];

/// Find an icon by request path.
pub fn icon(path: &str) -> Option<&'static StaticAsset> {
    ICONS.iter().find(|asset| asset.path == path)
}
