//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Podcastr"      # Suffix of every page <title>
//! locale = "pt-BR"        # "en" (default) or "pt-BR"
//! home_url = "/"          # Target of the back button
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::episode::Locale;

/// Site-wide presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site name shown in the page title.
    pub title: String,

    /// Locale for month names and page strings.
    pub locale: Locale,

    /// Where the back button leads.
    pub home_url: String,
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const HOME_URL: FieldPath = FieldPath::new("site.home_url");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "must not be empty");
        }
        if self.home_url.trim().is_empty() {
            diag.error_with_hint(Self::HOME_URL, "must not be empty", "use \"/\" for the site root");
        }
    }
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "Podcastr".to_string(),
            locale: Locale::default(),
            home_url: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::episode::Locale;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.title, "Podcastr");
        assert_eq!(config.site.locale, Locale::En);
        assert_eq!(config.site.home_url, "/");
    }

    #[test]
    fn test_site_locale() {
        let config = test_parse_config("[site]\nlocale = \"pt-BR\"");
        assert_eq!(config.site.locale, Locale::PtBr);
    }
}
