//! `podcastr fetch`: fetch and normalize one episode, print it as JSON.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::page::is_valid_slug;

use super::common::regenerator;

pub fn fetch_episode(config: &SiteConfig, slug: &str, pretty: bool) -> Result<()> {
    if !is_valid_slug(slug) {
        bail!("invalid slug {slug:?}");
    }

    let episode = regenerator(config)?
        .regenerate(slug)
        .with_context(|| format!("failed to generate episode `{slug}`"))?;

    let json = if pretty {
        serde_json::to_string_pretty(&*episode)?
    } else {
        serde_json::to_string(&*episode)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
