//! Episode page server.
//!
//! Request flow:
//!
//! ```text
//! /global.css, /*.svg ─► asset
//! /episodes/{slug} ─► PageCache::lookup
//!     Fresh   ─► page
//!     Stale   ─► page + background regeneration
//!     Missing ─► loading page + background generation
//!                (502 once if the last attempt failed)
//! anything else ─► 404
//! ```

mod lifecycle;
mod response;

use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Method, Request, Server};

use crate::config::{SiteConfig, cfg};
use crate::core::{is_serving, is_shutdown, set_serving};
use crate::episode::DisplayEpisode;
use crate::page::{EPISODE_ROUTE, Lookup, Regenerator, StaticPaths, resolve_slug, static_paths};
use crate::render::{EpisodeView, RenderContext, STYLESHEET_PATH, icon};
use crate::utils::plural_count;
use crate::{debug, log};

use super::common::regenerator;

/// Shared state of the request handlers.
pub struct Host {
    regen: Arc<Regenerator>,
    paths: StaticPaths,
    ctx: RenderContext,
    stylesheet: String,
    cache_control: String,
}

/// What an episode route answers with.
#[derive(Debug)]
pub enum Outcome {
    Ready(Arc<DisplayEpisode>),
    Loading,
    NotFound,
    Failed(String),
}

impl Host {
    pub fn new(regen: Arc<Regenerator>, paths: StaticPaths, ctx: RenderContext) -> Self {
        let stylesheet = ctx.stylesheet();
        let cache_control = regen.revalidate().cache_control();
        Self {
            regen,
            paths,
            ctx,
            stylesheet,
            cache_control,
        }
    }

    /// Decide the answer for an episode URL.
    ///
    /// `consume_failure` forgets a remembered failure once it is reported,
    /// so the following request starts a new attempt. HEAD polls pass
    /// `false` and only learn that a failure page is waiting.
    pub fn resolve(&self, url: &str, consume_failure: bool) -> Outcome {
        let Some(params) = EPISODE_ROUTE.matches(url) else {
            return Outcome::NotFound;
        };
        let Some(slug) = resolve_slug(&params) else {
            return Outcome::NotFound;
        };

        match self.regen.cache().lookup(slug) {
            Lookup::Fresh(episode) => Outcome::Ready(episode),
            Lookup::Stale(episode) => {
                if self.regen.trigger(slug) {
                    debug!("serve"; "{} is stale, regenerating", slug);
                }
                Outcome::Ready(episode)
            }
            Lookup::Missing if !self.paths.allows(slug) => Outcome::NotFound,
            Lookup::Missing => {
                let failure = if consume_failure {
                    self.regen.take_failure(slug)
                } else {
                    self.regen.failure(slug)
                };
                match failure {
                    Some(message) => Outcome::Failed(message),
                    None => {
                        self.regen.trigger(slug);
                        Outcome::Loading
                    }
                }
            }
        }
    }

    /// Generate the static paths before accepting episode traffic.
    pub fn pregenerate(&self) {
        if self.paths.slugs.is_empty() {
            return;
        }

        let failed = self
            .paths
            .slugs
            .iter()
            .filter(|slug| match self.regen.regenerate(slug) {
                Ok(_) => false,
                Err(e) => {
                    log!("regen"; "{}: {}", slug, e);
                    true
                }
            })
            .count();

        let generated = self.paths.slugs.len() - failed;
        log!("serve"; "pre-generated {}", plural_count(generated, "episode"));
    }
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    Ok(BoundServer { server })
}

impl BoundServer {
    /// Start the request loop (blocking until shutdown).
    pub fn run(self, host: Arc<Host>) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cfg().serve.workers)
            .thread_name(|i| format!("http-{i}"))
            .build()
            .context("failed to create request thread pool")?;

        for request in self.server.incoming_requests() {
            let host = Arc::clone(&host);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &host) {
                    log!("serve"; "request error: {e}");
                }
            });
        }
        Ok(())
    }
}

/// Run `podcastr serve`.
pub fn serve(config: &SiteConfig) -> Result<()> {
    let host = Arc::new(Host::new(
        regenerator(config)?,
        static_paths(config),
        RenderContext::from_config(config),
    ));

    // Bind first so early requests get a loading page instead of a refused connection
    let bound = bind_server(config)?;

    let startup = Arc::clone(&host);
    std::thread::spawn(move || {
        startup.pregenerate();
        set_serving();
    });

    bound.run(host)
}

/// Handle a single HTTP request
fn handle_request(request: Request, host: &Host) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let path = request_path(request.url());
    if path == STYLESHEET_PATH {
        return response::respond_asset(request, STYLESHEET_PATH, host.stylesheet.as_bytes());
    }
    if let Some(asset) = icon(path) {
        return response::respond_asset(request, asset.path, asset.body.as_bytes());
    }

    if !is_serving() {
        let body = EpisodeView::Loading.render(&host.ctx);
        return response::respond_loading(request, body);
    }

    let is_head = response::is_head_request(&request);
    match host.resolve(request.url(), !is_head) {
        Outcome::Ready(episode) => {
            let body = EpisodeView::Ready(&episode).render(&host.ctx);
            response::respond_episode(request, body, &host.cache_control)
        }
        Outcome::Loading => {
            let body = EpisodeView::Loading.render(&host.ctx);
            response::respond_loading(request, body)
        }
        Outcome::Failed(message) => response::respond_generate_error(request, &message),
        Outcome::NotFound => response::respond_not_found(request),
    }
}

/// Request path without query string or fragment.
fn request_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================
