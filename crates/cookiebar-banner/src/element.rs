//! Element identifiers every banner fragment must provide

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Bar,
    AcceptButton,
    DeclineButton,
    Prompt,
    PromptButton,
    PromptClose,
    PromptContent,
    NoConsent,
    Thirdparty,
    Tracking,
    Scrolling,
    PrivacyPage,
    PrivacyLink,
    MainPrivacyLink,
}

impl Element {
    pub const ALL: [Element; 14] = [
        Element::Bar,
        Element::AcceptButton,
        Element::DeclineButton,
        Element::Prompt,
        Element::PromptButton,
        Element::PromptClose,
        Element::PromptContent,
        Element::NoConsent,
        Element::Thirdparty,
        Element::Tracking,
        Element::Scrolling,
        Element::PrivacyPage,
        Element::PrivacyLink,
        Element::MainPrivacyLink,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Bar => "cookie-bar",
            Self::AcceptButton => "cookie-bar-button",
            Self::DeclineButton => "cookie-bar-button-no",
            Self::Prompt => "cookie-bar-prompt",
            Self::PromptButton => "cookie-bar-prompt-button",
            Self::PromptClose => "cookie-bar-prompt-close",
            Self::PromptContent => "cookie-bar-prompt-content",
            Self::NoConsent => "cookie-bar-no-consent",
            Self::Thirdparty => "cookie-bar-thirdparty",
            Self::Tracking => "cookie-bar-tracking",
            Self::Scrolling => "cookie-bar-scrolling",
            Self::PrivacyPage => "cookie-bar-privacy-page",
            Self::PrivacyLink => "cookie-bar-privacy-link",
            Self::MainPrivacyLink => "cookie-bar-main-privacy-link",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}

/// Page edge the bar is anchored to; the body margin grows on the same side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub fn from_top(top: bool) -> Self {
        if top { Self::Top } else { Self::Bottom }
    }
}
