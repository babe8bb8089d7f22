//! Banner lifecycle: `Hidden -> Shown -> {Accepted, Declined}`
//!
//! The controller is built from the resolver's [`Resolution`] and acts at
//! most once per page life. Both terminal states are stable: later events
//! are ignored until the next page load resolves again.

use crate::element::{Edge, Element};
use crate::fade::{BAR_FADE, BLOCKING_PROMPT_FADE};
use crate::fragment::{BannerFragment, FragmentSource};
use crate::layout::BannerLayout;
use crate::presenter::Presenter;
use cookiebar_core::locale::negotiate_language;
use cookiebar_core::{
    BannerConfiguration, ConsentStore, ConsentValue, Error, Resolution, Result, SuppressReason,
    Verdict,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Scroll distance from the initial position that counts as consent.
pub const SCROLL_THRESHOLD_PX: f64 = 250.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BannerState {
    Hidden,
    Shown { detail_prompt_open: bool },
    Accepted,
    Declined,
}

impl BannerState {
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }
}

pub struct BannerController {
    resolution: Resolution,
    config: BannerConfiguration,
    store: Arc<dyn ConsentStore>,
    presenter: Box<dyn Presenter>,
    fixed_language: Option<String>,
    state: BannerState,
    started: bool,
    no_consent_text: String,
    initial_scroll: f64,
}

impl BannerController {
    pub fn new(
        resolution: Resolution,
        config: BannerConfiguration,
        store: Arc<dyn ConsentStore>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            resolution,
            config,
            store,
            presenter,
            fixed_language: None,
            state: BannerState::Hidden,
            started: false,
            no_consent_text: String::new(),
            initial_scroll: 0.0,
        }
    }

    /// Always use this language instead of the visitor's locale.
    pub fn with_fixed_language(mut self, language: Option<String>) -> Self {
        self.fixed_language = language;
        self
    }

    pub fn state(&self) -> BannerState {
        self.state
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn config(&self) -> &BannerConfiguration {
        &self.config
    }

    /// Bring the banner up if the resolution asks for it.
    ///
    /// A visitor outside the jurisdiction goes straight to `Accepted`. A
    /// failed fragment fetch leaves the banner hidden for this page load.
    pub async fn start(&mut self, fragments: &dyn FragmentSource, locale: Option<&str>) -> BannerState {
        if self.started {
            return self.state;
        }
        self.started = true;

        // Consent was already persisted by the resolver.
        if self.resolution.verdict == Verdict::Suppressed(SuppressReason::OutsideJurisdiction) {
            self.state = BannerState::Accepted;
            info!("Consent assumed outside jurisdiction");
        }
        if self.resolution.reload {
            self.presenter.reload();
            return self.state;
        }
        if !self.resolution.must_prompt_banner() {
            return self.state;
        }

        if let Err(e) = self.show(fragments, locale).await {
            debug!("Banner not shown: {}", e);
        }
        self.state
    }

    async fn show(&mut self, fragments: &dyn FragmentSource, locale: Option<&str>) -> Result<()> {
        let stylesheet = self.config.stylesheet_url()?;
        self.presenter.load_stylesheet(&stylesheet);

        let language = negotiate_language(self.fixed_language.as_deref(), locale);
        let url = self.config.fragment_url(language)?;
        let html = fragments.fetch(&url).await?;
        let fragment = BannerFragment::parse(&html)?;
        let layout = BannerLayout::from_config(&self.config);

        self.presenter.mount(&fragment, &layout);
        if self.config.blocking {
            self.presenter.fade_in(Element::Prompt, BLOCKING_PROMPT_FADE);
        }
        self.presenter.fade_in(Element::Bar, BAR_FADE);
        self.presenter.set_body_margin(layout.edge);

        self.no_consent_text = fragment.no_consent_text().to_string();
        self.initial_scroll = self.presenter.scroll_offset();
        self.state = BannerState::Shown {
            detail_prompt_open: self.config.blocking,
        };
        info!("Banner shown ({})", language);
        Ok(())
    }

    /// Explicit accept.
    pub fn accept(&mut self) -> Result<BannerState> {
        if !self.state.is_shown() {
            return Ok(self.state);
        }
        self.store.set(ConsentValue::Allowed, self.config.remember)?;
        self.dismiss();
        self.state = BannerState::Accepted;
        info!("Consent accepted");
        if self.config.refresh_page {
            self.presenter.reload();
        }
        Ok(self.state)
    }

    /// Scroll event. Far enough from where the banner appeared, it accepts.
    pub fn scrolled(&mut self, offset: f64) -> Result<BannerState> {
        if !self.config.scrolling || !self.state.is_shown() {
            return Ok(self.state);
        }
        if (offset - self.initial_scroll).abs() > SCROLL_THRESHOLD_PX {
            debug!("Scrolled {}px - accepting", offset - self.initial_scroll);
            return self.accept();
        }
        Ok(self.state)
    }

    /// Explicit decline, confirmed against the no-consent warning.
    ///
    /// Returns [`Error::UserCancel`] when the visitor backs out; the banner
    /// stays up.
    pub fn decline(&mut self) -> Result<BannerState> {
        if !self.state.is_shown() {
            return Ok(self.state);
        }
        if !self.config.show_no_consent {
            debug!("Decline ignored: reject control is not shown");
            return Ok(self.state);
        }
        if !self.presenter.confirm(&self.no_consent_text) {
            return Err(Error::UserCancel);
        }

        self.store.clear()?;
        self.store.set(ConsentValue::Disallowed, self.config.remember)?;
        self.dismiss();
        self.state = BannerState::Declined;
        info!("Consent declined");
        Ok(self.state)
    }

    pub fn open_details(&mut self) -> BannerState {
        if let BannerState::Shown { detail_prompt_open: false } = self.state {
            self.presenter.fade_in(Element::Prompt, BLOCKING_PROMPT_FADE);
            self.state = BannerState::Shown { detail_prompt_open: true };
        }
        self.state
    }

    /// Closing is not possible while the prompt is blocking.
    pub fn close_details(&mut self) -> BannerState {
        if self.config.blocking {
            return self.state;
        }
        if let BannerState::Shown { detail_prompt_open: true } = self.state {
            self.presenter.fade_out(Element::Prompt, BAR_FADE);
            self.state = BannerState::Shown { detail_prompt_open: false };
        }
        self.state
    }

    fn dismiss(&mut self) {
        self.presenter.clear_body_margin(Edge::from_top(self.config.top));
        self.presenter.fade_out(Element::Prompt, BAR_FADE);
        self.presenter.fade_out(Element::Bar, BAR_FADE);
    }
}
