//! Rendering seam
//!
//! The controller only asks for things to happen; a [`Presenter`] decides
//! how. Calls arrive in the order they must take effect: the body margin is
//! cleared before the fade-out starts, and persistence has completed before
//! `reload` is called.

use crate::element::{Edge, Element};
use crate::fade::FadeSchedule;
use crate::fragment::BannerFragment;
use crate::layout::BannerLayout;
use std::time::Duration;
use tracing::{info, trace};
use url::Url;

pub trait Presenter: Send {
    fn load_stylesheet(&mut self, href: &Url);

    /// Insert the fragment into the page and apply the layout to it.
    fn mount(&mut self, fragment: &BannerFragment, layout: &BannerLayout);

    fn fade_in(&mut self, element: Element, duration: Duration);

    fn fade_out(&mut self, element: Element, duration: Duration);

    /// Grow the body margin on `edge` by the bar height.
    fn set_body_margin(&mut self, edge: Edge);

    fn clear_body_margin(&mut self, edge: Edge);

    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Ask the visitor to confirm `message`; true if they did.
    fn confirm(&mut self, message: &str) -> bool;

    fn reload(&mut self);
}

/// Presenter without a page: every request is emitted as a tracing event.
/// Confirmation answers are preset.
pub struct TracePresenter {
    confirm_answer: bool,
    scroll_offset: f64,
    reloaded: bool,
}

impl TracePresenter {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            scroll_offset: 0.0,
            reloaded: false,
        }
    }

    pub fn reloaded(&self) -> bool {
        self.reloaded
    }

    fn trace_fade(element: Element, schedule: FadeSchedule) {
        for (offset, opacity) in schedule.steps() {
            trace!("{} opacity {:.1} at +{}ms", element, opacity, offset.as_millis());
        }
    }
}

impl Presenter for TracePresenter {
    fn load_stylesheet(&mut self, href: &Url) {
        info!("stylesheet {}", href);
    }

    fn mount(&mut self, fragment: &BannerFragment, layout: &BannerLayout) {
        info!(
            "mount banner ({} bytes, anchored {:?}, {} directives)",
            fragment.html().len(),
            layout.edge,
            layout.directives.len()
        );
        for directive in &layout.directives {
            trace!("apply {:?}", directive);
        }
    }

    fn fade_in(&mut self, element: Element, duration: Duration) {
        info!("fade in {} over {}ms", element, duration.as_millis());
        Self::trace_fade(element, FadeSchedule::fade_in(duration));
    }

    fn fade_out(&mut self, element: Element, duration: Duration) {
        info!("fade out {} over {}ms", element, duration.as_millis());
        Self::trace_fade(element, FadeSchedule::fade_out(duration));
    }

    fn set_body_margin(&mut self, edge: Edge) {
        info!("body margin {:?} += bar height", edge);
    }

    fn clear_body_margin(&mut self, edge: Edge) {
        info!("body margin {:?} -= bar height", edge);
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn confirm(&mut self, message: &str) -> bool {
        info!("confirm {:?} -> {}", message, self.confirm_answer);
        self.confirm_answer
    }

    fn reload(&mut self) {
        info!("reload page");
        self.reloaded = true;
    }
}
