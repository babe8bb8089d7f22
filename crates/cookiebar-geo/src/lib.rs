//! Cookiebar Geo - Jurisdiction lookup with a hard deadline

pub mod http;
pub mod locator;
pub mod lookup;

pub use http::HttpLocator;
pub use locator::{GeoError, GeoResult, JurisdictionLocator, StaticLocator};
pub use lookup::JurisdictionLookup;
pub use tokio_util::sync::CancellationToken;
