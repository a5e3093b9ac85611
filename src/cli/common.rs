//! Common utilities shared across CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::config::SiteConfig;
use crate::page::{PageCache, Regenerator, Revalidate};

/// HTTP client for the configured episode API.
pub fn api_client(config: &SiteConfig) -> Result<ApiClient> {
    let base_url = config
        .api
        .url()
        .with_context(|| format!("invalid api.base_url `{}`", config.api.base_url))?;
    ApiClient::new(base_url, config.api.timeout()).context("failed to build http client")
}

/// Regenerator over the configured API with an empty page cache.
pub fn regenerator(config: &SiteConfig) -> Result<Arc<Regenerator>> {
    let client = api_client(config)?;
    Ok(Arc::new(Regenerator::new(
        Arc::new(client),
        Arc::new(PageCache::new()),
        config.site.locale,
        Revalidate::from_config(&config.build),
    )))
}
