//! Episode route matching and static path listing.
//!
//! ```text
//! /episodes/a-day-in-the-life?ref=home
//!           └──── slug ─────┘
//! ```

use percent_encoding::percent_decode_str;

use crate::config::{Fallback, SiteConfig};

/// The only dynamic route.
pub const EPISODE_ROUTE: RoutePattern = RoutePattern::new("/episodes/{slug}");

/// A path pattern made of literal segments and `{name}` captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePattern {
    pattern: &'static str,
}

/// Captured segments of a matched route, already percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: Vec<(&'static str, String)>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&'static str, &str)]) -> Self {
        Self {
            params: pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect(),
        }
    }
}

impl RoutePattern {
    pub const fn new(pattern: &'static str) -> Self {
        Self { pattern }
    }

    /// Match a request path.
    ///
    /// Query string and fragment are ignored, surrounding slashes trimmed,
    /// and each segment is percent-decoded after splitting so an encoded
    /// `%2F` stays inside its segment.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut actual = path.trim_matches('/').split('/');
        let mut params = Vec::new();

        for expected in self.pattern.trim_matches('/').split('/') {
            let segment = actual.next()?;
            let decoded = percent_decode_str(segment).decode_utf8().ok()?;

            match expected.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => params.push((name, decoded.into_owned())),
                None if decoded == expected => {}
                None => return None,
            }
        }

        if actual.next().is_some() {
            return None;
        }

        Some(RouteParams { params })
    }
}

/// Extract a usable slug from matched params.
///
/// A params bag without `slug` means the route table is wrong; it is
/// answered like any unknown page instead of panicking.
pub fn resolve_slug(params: &RouteParams) -> Option<&str> {
    params.get("slug").filter(|slug| is_valid_slug(slug))
}

/// A slug is one non-empty path segment that cannot climb directories.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}

/// Slugs generated ahead of time, and what happens to every other slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPaths {
    pub slugs: Vec<String>,
    pub fallback: Fallback,
}

impl StaticPaths {
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// Whether a request for `slug` may be generated at all.
    pub fn allows(&self, slug: &str) -> bool {
        self.fallback == Fallback::OnDemand || self.contains(slug)
    }
}

pub fn static_paths(config: &SiteConfig) -> StaticPaths {
    StaticPaths {
        slugs: config.build.paths.clone(),
        fallback: config.build.fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn slug_of(path: &str) -> Option<String> {
        EPISODE_ROUTE
            .matches(path)
            .and_then(|params| resolve_slug(&params).map(str::to_owned))
    }

    #[test]
    fn test_matches_episode_route() {
        assert_eq!(slug_of("/episodes/a-day").as_deref(), Some("a-day"));
        assert_eq!(slug_of("/episodes/a-day/").as_deref(), Some("a-day"));
        assert_eq!(slug_of("episodes/a-day").as_deref(), Some("a-day"));
        assert_eq!(slug_of("/episodes/a-day?x=1#top").as_deref(), Some("a-day"));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(slug_of("/episodes/caf%C3%A9").as_deref(), Some("café"));
        assert_eq!(slug_of("/episodes/a%20b").as_deref(), Some("a b"));
        // Encoded separators decode inside the segment and are rejected.
        assert_eq!(slug_of("/episodes/..%2Fetc"), None);
        assert_eq!(slug_of("/episodes/a%5Cb"), None);
        // Invalid UTF-8
        assert_eq!(slug_of("/episodes/%FF"), None);
    }

    #[test]
    fn test_non_matching_paths() {
        assert!(EPISODE_ROUTE.matches("/").is_none());
        assert!(EPISODE_ROUTE.matches("/episodes").is_none());
        assert!(EPISODE_ROUTE.matches("/episodes/a/b").is_none());
        assert!(EPISODE_ROUTE.matches("/podcasts/a").is_none());
        assert!(EPISODE_ROUTE.matches("/global.css").is_none());
    }

    #[test]
    fn test_resolve_slug_missing_param() {
        let params = RouteParams::from_pairs(&[("id", "x")]);
        assert_eq!(resolve_slug(&params), None);

        let params = RouteParams::from_pairs(&[("slug", "")]);
        assert_eq!(resolve_slug(&params), None);

        let params = RouteParams::from_pairs(&[("slug", "ok")]);
        assert_eq!(resolve_slug(&params), Some("ok"));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("episode-1"));
        assert!(is_valid_slug("a.b"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug("a\\b"));
    }

    #[test]
    fn test_static_paths_default() {
        let paths = static_paths(&test_parse_config(""));
        assert!(paths.slugs.is_empty());
        assert_eq!(paths.fallback, Fallback::OnDemand);
        assert!(paths.allows("anything"));
    }

    #[test]
    fn test_static_paths_without_fallback() {
        let paths = static_paths(&test_parse_config(
            "[build]\npaths = [\"listed\"]\nfallback = \"none\"",
        ));
        assert!(paths.allows("listed"));
        assert!(!paths.allows("other"));
    }
}
