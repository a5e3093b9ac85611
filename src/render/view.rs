//! Episode page rendering.
//!
//! A page is either `Loading` (not generated yet) or `Ready`. Rendering is
//! infallible: every text field is escaped, the description is emitted as
//! the `TrustedHtml` it was normalized into.

use super::template::{Template, TemplateVars, substitute};
use crate::config::{SiteConfig, ThemeSectionConfig};
use crate::episode::{DisplayEpisode, Locale};
use crate::utils::html::{escape, escape_attr};

/// Header a client polls to learn that a real page is available.
pub const READY_HEADER: &str = "X-Podcastr-Ready";

/// Loading page poll interval.
const POLL_INTERVAL_MS: u32 = 1000;

const EPISODE_HTML: Template<EpisodeVars<'static>> =
    Template::new(include_str!("templates/episode.html"));

const LOADING_HTML: Template<LoadingVars<'static>> =
    Template::new(include_str!("templates/loading.html"));

/// Localized page strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub loading: &'static str,
    pub back: &'static str,
    pub play: &'static str,
}

impl Strings {
    pub const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                loading: "Loading...",
                back: "Back",
                play: "Play episode",
            },
            Locale::PtBr => Self {
                loading: "Carregando...",
                back: "Voltar",
                play: "Tocar episódio",
            },
        }
    }
}

/// Everything a page needs besides the episode itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub site_title: String,
    pub home_url: String,
    pub locale: Locale,
    pub theme: ThemeSectionConfig,
}

impl RenderContext {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            site_title: config.site.title.clone(),
            home_url: config.site.home_url.clone(),
            locale: config.site.locale,
            theme: config.theme.clone(),
        }
    }

    pub const fn strings(&self) -> Strings {
        Strings::for_locale(self.locale)
    }

    /// Contents of `/global.css`.
    pub fn stylesheet(&self) -> String {
        super::style::global_css(&self.theme)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Presentation state of one response.
#[derive(Debug, Clone, Copy)]
pub enum EpisodeView<'a> {
    Loading,
    Ready(&'a DisplayEpisode),
}

impl EpisodeView<'_> {
    pub fn render(&self, ctx: &RenderContext) -> String {
        match self {
            Self::Loading => LOADING_HTML.render(&LoadingVars { ctx }),
            Self::Ready(episode) => EPISODE_HTML.render(&EpisodeVars { ctx, episode }),
        }
    }
}

struct LoadingVars<'a> {
    ctx: &'a RenderContext,
}

impl TemplateVars for LoadingVars<'_> {
    fn apply(&self, content: &str) -> String {
        let ctx = self.ctx;
        let poll = POLL_INTERVAL_MS.to_string();
        substitute(
            content,
            &[
                ("LANG", ctx.locale.tag()),
                ("SITE_TITLE", &*escape(&ctx.site_title)),
                ("LOADING", ctx.strings().loading),
                ("READY_HEADER", READY_HEADER),
                ("POLL_MS", poll.as_str()),
            ],
        )
    }
}

struct EpisodeVars<'a> {
    ctx: &'a RenderContext,
    episode: &'a DisplayEpisode,
}

impl TemplateVars for EpisodeVars<'_> {
    fn apply(&self, content: &str) -> String {
        let (ctx, ep) = (self.ctx, self.episode);
        let strings = ctx.strings();
        substitute(
            content,
            &[
                ("LANG", ctx.locale.tag()),
                ("SITE_TITLE", &*escape(&ctx.site_title)),
                ("HOME_URL", &*escape_attr(&ctx.home_url)),
                ("BACK", strings.back),
                ("PLAY", strings.play),
                ("THUMBNAIL", &*escape_attr(&ep.thumbnail)),
                ("TITLE", &*escape(&ep.title)),
                ("MEMBERS", &*escape(&ep.members)),
                ("PUBLISHED_AT", &*escape(&ep.published_at)),
                ("DURATION", ep.duration_as_string()),
                ("DESCRIPTION", ep.description.as_str()),
            ],
        )
    }
}
