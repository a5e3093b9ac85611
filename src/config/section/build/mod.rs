//! `[build]` section configuration.
//!
//! Controls page generation: which episodes are generated ahead of time,
//! what happens to the rest, and how long generated pages stay fresh.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"             # Static export directory
//! paths = ["episode-one"]       # Slugs generated ahead of time (default: none)
//! fallback = "on-demand"        # "on-demand" or "none"
//! revalidate = 86400            # Seconds before a generated page goes stale
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::page::is_valid_slug;

/// Default revalidation window: 24 hours.
pub const DEFAULT_REVALIDATE_SECS: u64 = 60 * 60 * 24;

/// What to do with a slug that was not generated ahead of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Generate on first request, showing a loading page meanwhile.
    #[default]
    OnDemand,
    /// Respond 404.
    None,
}

/// Build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory for `podcastr build`.
    pub output: PathBuf,

    /// Slugs generated ahead of time.
    pub paths: Vec<String>,

    /// Handling of slugs outside `paths`.
    pub fallback: Fallback,

    /// Seconds a generated page is served before regeneration.
    pub revalidate: u64,
}

impl BuildSectionConfig {
    pub const PATHS: FieldPath = FieldPath::new("build.paths");
    pub const REVALIDATE: FieldPath = FieldPath::new("build.revalidate");

    pub const fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut seen = HashSet::new();
        for slug in &self.paths {
            if !is_valid_slug(slug) {
                diag.error_with_hint(
                    Self::PATHS,
                    format!("invalid slug {slug:?}"),
                    "slugs are single path segments without `/`, `\\` or `..`",
                );
            } else if !seen.insert(slug.as_str()) {
                diag.error(Self::PATHS, format!("{slug:?} is listed more than once"));
            }
        }

        if self.revalidate == 0 {
            diag.error(Self::REVALIDATE, "must be at least 1 second");
        }
    }
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
            paths: Vec::new(),
            fallback: Fallback::OnDemand,
            revalidate: DEFAULT_REVALIDATE_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert!(config.build.paths.is_empty());
        assert_eq!(config.build.fallback, Fallback::OnDemand);
        assert_eq!(config.build.revalidate(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_build_overrides() {
        let config = test_parse_config(
            "[build]\npaths = [\"a\", \"b\"]\nfallback = \"none\"\nrevalidate = 60",
        );
        assert_eq!(config.build.paths, vec!["a", "b"]);
        assert_eq!(config.build.fallback, Fallback::None);
        assert_eq!(config.build.revalidate, 60);
    }

    #[test]
    fn test_build_validate_slugs() {
        let config = BuildSectionConfig {
            paths: vec!["ok".into(), "../etc".into(), String::new()],
            revalidate: 0,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_build_rejects_duplicate_paths() {
        let config = test_parse_config("[build]\npaths = [\"a\", \"b\", \"a\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("\"a\" is listed more than once"));
    }
}
