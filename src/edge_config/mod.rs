//! # Remote Configuration
//!
//! Readers for the low-latency key-value store that holds operational flags.
//!
//! The store is independent of the record database. It holds three entries:
//!
//! - `siteConfig` - site metadata and the analytics toggle
//! - `featureFlags` - boolean feature toggles
//! - `maintenanceMode` - a single boolean
//!
//! Reads are independent and may fail at any time. Callers decide how to
//! degrade; see [`crate::gate`].

pub mod errors;
pub mod http;
pub mod memory;
pub mod source;
pub mod types;

pub use errors::{ConfigSourceError, ConfigSourceResult};
pub use http::{HttpConfigSource, HttpSourceSettings};
pub use memory::InMemoryConfigSource;
pub use source::{ConfigSource, UnconfiguredSource};
pub use types::{ConfigKey, FeatureFlags, SiteConfig, SocialLinks};
