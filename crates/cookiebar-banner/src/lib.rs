//! Cookiebar Banner - Consent resolution and the banner lifecycle
//!
//! One page load runs [`boot`]: the resolver decides whether consent must be
//! asked for, then the controller drives the banner through
//! `Hidden -> Shown -> {Accepted, Declined}`. Rendering goes through
//! [`Presenter`]; nothing here touches a real document.

pub mod controller;
pub mod element;
pub mod fade;
pub mod fragment;
pub mod layout;
pub mod presenter;
pub mod resolver;

pub use controller::{BannerController, BannerState};
pub use element::{Edge, Element};
pub use fragment::{BannerFragment, DirFragmentSource, FragmentSource, HttpFragmentSource};
pub use layout::{BannerLayout, Directive, Visibility};
pub use presenter::{Presenter, TracePresenter};
pub use resolver::ConsentResolver;

use cookiebar_core::{BannerConfiguration, Result};

/// Resolve consent state and, if needed, bring up the banner.
///
/// A reload requested by the resolver is carried out before (and instead
/// of) showing anything.
pub async fn boot(
    resolver: &ConsentResolver,
    config: BannerConfiguration,
    presenter: Box<dyn Presenter>,
    fragments: &dyn FragmentSource,
    fixed_language: Option<String>,
    locale: Option<&str>,
) -> Result<BannerController> {
    let resolution = resolver.resolve(&config, None).await?;
    let mut controller = BannerController::new(resolution, config, resolver.store(), presenter)
        .with_fixed_language(fixed_language);
    controller.start(fragments, locale).await;
    Ok(controller)
}
