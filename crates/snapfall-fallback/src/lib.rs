//! Snapfall Fallback
//!
//! Composition root for snapshot-backed API calls:
//! - Loads [`SnapshotConfig`]
//! - Wires the resolver and a directory-backed store
//! - Serves live responses, falling back to recorded snapshots on failure
//!   or when stable mode is on
//!
//! # Example
//!
//! ```rust,ignore
//! use snapfall_fallback::{SnapshotConfig, SnapshotFallback};
//! use snapfall_resolver::RequestDescriptor;
//!
//! # async fn example(http: &reqwest::Client) {
//! let fallback = SnapshotFallback::new(&SnapshotConfig::default());
//! fallback.warm_up().await;
//!
//! let request = RequestDescriptor::parse("/leaderboard/?period=weekly");
//! let mode = fallback.mode_for("stable=true");
//! let served = fallback
//!     .fetch(&request, mode, || async { live_call(http, &request).await })
//!     .await;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;

pub use client::{Served, SnapshotFallback};
pub use config::SnapshotConfig;
pub use error::ConfigError;
pub use telemetry::LogFormat;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for fallback clients
    pub use crate::{Served, SnapshotConfig, SnapshotFallback};
    pub use snapfall_resolver::{RequestDescriptor, StableMode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
