//! Static export of the listed episode paths.
//!
//! Output layout:
//!
//! ```text
//! public/
//! ├── global.css
//! ├── arrow-left.svg
//! ├── play.svg
//! └── episodes/
//!     └── <slug>/index.html
//! ```
//!
//! Episodes are generated in parallel. A failing episode is reported and
//! skipped; the command fails once all others are written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::core::is_shutdown;
use crate::logger::ProgressLine;
use crate::page::{Regenerator, static_paths};
use crate::render::{EpisodeView, ICONS, RenderContext, STYLESHEET_PATH};
use crate::utils::plural_count;
use crate::log;

use super::common::regenerator;

/// Run `podcastr build`.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let regen = regenerator(config)?;
    let ctx = RenderContext::from_config(config);
    export(config, &regen, &ctx)
}

/// Write assets and every static path into `build.output`.
pub fn export(config: &SiteConfig, regen: &Regenerator, ctx: &RenderContext) -> Result<()> {
    let output = &config.build.output;
    let slugs = static_paths(config).slugs;

    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    if slugs.is_empty() {
        log!("build"; "no static paths listed in build.paths");
    }

    let progress = ProgressLine::new(&[("episodes", slugs.len()), ("assets", ICONS.len() + 1)]);

    write_assets(output, ctx, &progress)?;

    let results: Vec<(String, Result<()>)> = slugs
        .par_iter()
        .filter_map(|slug| {
            if is_shutdown() {
                return None;
            }
            let result = export_episode(output, slug, regen, ctx);
            progress.inc("episodes");
            Some((slug.clone(), result))
        })
        .collect();

    progress.finish();

    let report = ExportReport::collect(results);
    for (slug, e) in &report.failed {
        log!("error"; "{}: {:#}", slug, e);
    }

    let shown = output.strip_prefix(config.get_root()).unwrap_or(output);
    log!("build"; "wrote {} to {}", plural_count(report.written, "episode"), shown.display());

    let skipped = slugs.len() - report.attempted();
    if skipped > 0 {
        log!("build"; "interrupted, {} not exported", plural_count(skipped, "episode"));
    }

    if !report.failed.is_empty() {
        bail!("{} failed", plural_count(report.failed.len(), "episode"));
    }
    Ok(())
}

/// Per-slug export results. Slugs skipped on shutdown are absent.
#[derive(Debug, Default)]
struct ExportReport {
    written: usize,
    failed: Vec<(String, anyhow::Error)>,
}

impl ExportReport {
    fn collect(results: Vec<(String, Result<()>)>) -> Self {
        let mut report = Self::default();
        for (slug, result) in results {
            match result {
                Ok(()) => report.written += 1,
                Err(e) => report.failed.push((slug, e)),
            }
        }
        report
    }

    fn attempted(&self) -> usize {
        self.written + self.failed.len()
    }
}

fn write_assets(output: &Path, ctx: &RenderContext, progress: &ProgressLine) -> Result<()> {
    write_file(&asset_path(output, STYLESHEET_PATH), ctx.stylesheet().as_bytes())?;
    progress.inc("assets");

    for icon in &ICONS {
        write_file(&asset_path(output, icon.path), icon.body.as_bytes())?;
        progress.inc("assets");
    }
    Ok(())
}

fn export_episode(
    output: &Path,
    slug: &str,
    regen: &Regenerator,
    ctx: &RenderContext,
) -> Result<()> {
    let episode = regen.regenerate(slug)?;
    let html = EpisodeView::Ready(&episode).render(ctx);
    write_file(&episode_path(output, slug), html.as_bytes())
}

/// `<output>/episodes/<slug>/index.html`
pub fn episode_path(output: &Path, slug: &str) -> PathBuf {
    output.join("episodes").join(slug).join("index.html")
}

fn asset_path(output: &Path, url_path: &str) -> PathBuf {
    output.join(url_path.trim_start_matches('/'))
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
