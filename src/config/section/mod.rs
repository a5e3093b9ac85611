//! Configuration section definitions.
//!
//! Each module corresponds to a section in `podcastr.toml`:
//!
//! | Module  | TOML Section | Purpose                                 |
//! |---------|--------------|-----------------------------------------|
//! | `api`   | `[api]`      | Remote episode API                      |
//! | `build` | `[build]`    | Static paths, fallback, revalidation    |
//! | `serve` | `[serve]`    | HTTP server                             |
//! | `site`  | `[site]`     | Title, locale, home link                |
//! | `theme` | `[theme]`    | Palette, typography, breakpoints        |

mod api;
pub mod build;
mod serve;
pub mod site;
pub mod theme;

pub use api::ApiConfig;
pub use build::{BuildSectionConfig, Fallback};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use theme::ThemeSectionConfig;
