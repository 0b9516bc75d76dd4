//! Snapfall Resolver
//!
//! Maps the shape of a would-be live API call to the name of a frozen
//! snapshot fixture.
//!
//! # Core Concepts
//!
//! - [`RequestDescriptor`]: path plus verbatim query string of a request
//! - [`SnapshotId`]: file-like name of one recorded fixture
//! - [`Resolver`]: ordered [`VariantRule`]s followed by an exact [`RouteTable`]
//! - [`StableMode`]: whether the caller asked for frozen data
//!
//! # Example
//!
//! ```rust
//! use snapfall_resolver::{RequestDescriptor, Resolver};
//!
//! let resolver = Resolver::standard();
//! let request = RequestDescriptor::parse("/dashboard/stats/?period=7days");
//!
//! let id = resolver.resolve(&request).unwrap();
//! assert_eq!(id.as_str(), "dashboard-stats-7days.json");
//! ```
//!
//! Resolution is pure: no I/O, no shared state, safe to call from any thread.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod descriptor;
pub mod id;
pub mod mode;
pub mod rules;

pub use catalog::{Capture, CAPTURE_PLAN, DEFAULT_PRELOAD};
pub use descriptor::{QueryParams, RequestDescriptor};
pub use id::SnapshotId;
pub use mode::{ModeFlag, StableMode};
pub use rules::{Resolver, ResolverBuilder, RouteTable, VariantRule};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for resolving snapshots
    pub use crate::descriptor::{QueryParams, RequestDescriptor};
    pub use crate::id::SnapshotId;
    pub use crate::mode::{ModeFlag, StableMode};
    pub use crate::rules::Resolver;
}
