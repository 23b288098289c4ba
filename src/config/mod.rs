//! Cache configuration
//!
//! - `CacheConfig` - resolved configuration handed to every cache component
//! - `CacheConfigBuilder` - fluent builder with `~` expansion and platform defaults

mod types;

pub use types::{CacheConfig, CacheConfigBuilder};
