//! Episode pages: routing, caching and regeneration.

mod generate;
mod revalidate;
mod route;
mod store;

pub use generate::Regenerator;
pub use revalidate::Revalidate;
pub use route::{EPISODE_ROUTE, StaticPaths, is_valid_slug, resolve_slug, static_paths};
pub use store::{Lookup, PageCache};
