//! Snapfall Store
//!
//! Process-wide, lazily populated cache of recorded API responses.
//!
//! # Architecture
//!
//! ```text
//! SnapshotId → SnapshotStore ──hit──→ SnapshotPayload
//!                   │ miss
//!                   ↓
//!             FixtureSource (directory, memory, ...) ──ok──→ cache insert
//!                   │ error / timeout
//!                   ↓
//!                 None (never cached)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use snapfall_store::{DirectorySource, SnapshotStore};
//! use snapfall_resolver::catalog;
//!
//! # async fn example() {
//! let store = SnapshotStore::new(DirectorySource::new("data/snapshots"));
//!
//! let warmed = store.preload(snapfall_resolver::DEFAULT_PRELOAD).await;
//! if let Some(profile) = store.get(&catalog::PROFILE).await {
//!     println!("{warmed} warm, profile: {profile}");
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod scrub;
pub mod source;
pub mod store;

pub use error::{LoadError, ScrubError};
pub use scrub::{ContentScrubber, Scrubbed};
pub use source::{DirectorySource, FixtureSource, MemorySource};
pub use store::{SnapshotPayload, SnapshotStore, StoreOptions, StoreStats};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with snapshot stores
    pub use crate::error::LoadError;
    pub use crate::source::{DirectorySource, FixtureSource, MemorySource};
    pub use crate::store::{SnapshotPayload, SnapshotStore, StoreOptions};
    pub use snapfall_resolver::SnapshotId;
}
