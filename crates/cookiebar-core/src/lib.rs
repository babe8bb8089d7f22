//! Cookiebar Core - Consent types, configuration, storage, and error handling

pub mod banner_config;
pub mod config;
pub mod cookie;
pub mod error;
pub mod locale;
pub mod store;
pub mod types;

pub use banner_config::BannerConfiguration;
pub use config::{CookiebarConfig, JurisdictionMode};
pub use error::{Error, Result};
pub use store::{ConsentStore, FileStore, MemoryStore};
pub use types::*;
