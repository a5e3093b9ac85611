//! Site configuration management for `podcastr.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── api        # [api]
//! │   ├── build      # [build]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── theme      # [theme]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Title, locale, back-button target                |
//! | `[api]`     | Episode API base URL and timeout                 |
//! | `[build]`   | Static paths, fallback, revalidation, output dir |
//! | `[serve]`   | HTTP server (interface, port, workers)           |
//! | `[theme]`   | Palette, typography, breakpoints                 |
//!
//! A missing config file is not an error: every field has a default.

pub mod section;
pub mod types;
mod util;

pub use util::normalize_path;
use util::find_config_file;

// Re-export from section/
pub use section::{ApiConfig, BuildSectionConfig, Fallback, ThemeSectionConfig};

// Re-export from types/
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

// Internal imports from section/
use section::{ServeConfig, SiteSectionConfig};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing podcastr.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Title, locale, home link
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Episode API
    #[serde(default)]
    pub api: ApiConfig,

    /// Page generation settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Design tokens
    #[serde(default)]
    pub theme: ThemeSectionConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is
    /// the config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, config_path) = match find_config_file(&cli.config) {
            Some(path) => (Self::from_path(&path)?, path),
            None => {
                log!("config"; "no {} found, using defaults", cli.config.display());
                (Self::default(), cwd.join(&cli.config))
            }
        };

        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let root = normalize_path(&root);

        self.apply_command_options(cli);
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.api.base_url, cli.api_url.as_ref());

        match &cli.command {
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Build { output } => {
                Self::update_option(&mut self.build.output, output.as_ref());
            }
            Commands::Fetch { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.api.validate(&mut diag);
        self.build.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.theme.validate(&mut diag);

        if self.build.fallback == Fallback::None && self.build.paths.is_empty() {
            diag.hint(
                BuildSectionConfig::PATHS,
                "fallback is \"none\" and no paths are listed, every episode will 404",
            );
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::try_parse_from(args).unwrap()))
    }

    #[test]
    fn test_parse_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = SiteConfig::parse_with_ignored("[site\ntitle = \"Pod\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "Podcastr");
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.serve.port, 5277);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\n[api]\ntimeout = 3";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = leak_cli(&[
            "podcastr",
            "--api-url",
            "http://api.test:9000",
            "serve",
            "--port",
            "9999",
            "--interface",
            "0.0.0.0",
        ]);
        let mut config = test_parse_config("[serve]\nport = 1234");
        config.apply_command_options(cli);

        assert_eq!(config.api.base_url, "http://api.test:9000");
        assert_eq!(config.serve.port, 9999);
        assert_eq!(config.serve.interface.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_finalize_resolves_output_against_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = leak_cli(&["podcastr", "build", "--output", "dist"]);

        let mut config = SiteConfig {
            config_path: dir.path().join("podcastr.toml"),
            ..Default::default()
        };
        config.finalize(cli);

        let root = normalize_path(dir.path());
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.output, root.join("dist"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("podcastr.toml");
        fs::write(&path, "[site]\nlocale = \"pt-BR\"\n[build]\npaths = [\"ep\"]").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert_eq!(config.site.locale, crate::episode::Locale::PtBr);
        assert_eq!(config.build.paths, vec!["ep"]);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = test_parse_config("[api]\ntimeout = 0\n[build]\nrevalidate = 0");
        let err = config.validate().unwrap_err();
        let diag = match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => diag,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(diag.len(), 2);
    }
}
