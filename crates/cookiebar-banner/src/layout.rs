//! Banner options translated into element changes

use crate::element::{Edge, Element};
use cookiebar_core::BannerConfiguration;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Hidden,
    Block,
    InlineBlock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Directive {
    Show(Element, Visibility),
    Href(Element, String),
}

/// What the presenter has to change in a freshly mounted fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BannerLayout {
    pub directives: Vec<Directive>,
    pub edge: Edge,
}

impl BannerLayout {
    pub fn from_config(config: &BannerConfiguration) -> Self {
        let mut directives = Vec::new();

        if !config.show_no_consent {
            directives.push(Directive::Show(Element::NoConsent, Visibility::Hidden));
            directives.push(Directive::Show(Element::DeclineButton, Visibility::Hidden));
        }
        if config.blocking {
            directives.push(Directive::Show(Element::PromptClose, Visibility::Hidden));
        }
        if config.thirdparty {
            directives.push(Directive::Show(Element::Thirdparty, Visibility::Block));
        }
        if config.tracking {
            directives.push(Directive::Show(Element::Tracking, Visibility::Block));
        }
        if config.hide_details_btn {
            directives.push(Directive::Show(Element::PromptButton, Visibility::Hidden));
        }
        if config.scrolling {
            directives.push(Directive::Show(Element::Scrolling, Visibility::InlineBlock));
        }
        if let Some(page) = &config.privacy_page {
            directives.push(Directive::Href(Element::PrivacyLink, page.clone()));
            directives.push(Directive::Show(Element::PrivacyPage, Visibility::InlineBlock));
            if config.shows_main_policy_link() {
                directives.push(Directive::Href(Element::MainPrivacyLink, page.clone()));
                directives.push(Directive::Show(Element::MainPrivacyLink, Visibility::InlineBlock));
            }
        }

        Self {
            directives,
            edge: Edge::from_top(config.top),
        }
    }

    /// Visibility override for `element`, if the options set one.
    pub fn visibility_of(&self, element: Element) -> Option<Visibility> {
        self.directives.iter().rev().find_map(|d| match d {
            Directive::Show(e, v) if *e == element => Some(*v),
            _ => None,
        })
    }

    pub fn href_of(&self, element: Element) -> Option<&str> {
        self.directives.iter().rev().find_map(|d| match d {
            Directive::Href(e, href) if *e == element => Some(href.as_str()),
            _ => None,
        })
    }
}
