//! Client-side state synchronization core.
//!
//! Keeps three locally cached collections (the favorites set, the albums
//! registry, and the paginated photo feed) consistent with a
//! non-transactional backend, supporting optimistic mutation with rollback,
//! compensating multi-step workflows, and cursor-based page merging. All
//! remote access goes through the [`picfolio_api::RemoteGateway`] trait;
//! nothing here knows about HTTP.
//!
//! Each component is the sole mutator of its own state. Execution is
//! cooperative: async calls suspend the initiating flow, and responses that
//! arrive after the bound principal has changed are discarded via
//! [`identity::ScopeToken`] checks.

pub mod albums;
pub mod client;
pub mod favorites;
pub mod feed;
pub mod identity;
pub mod lightbox;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use albums::{AlbumsRegistry, CreateOutcome, CreatePhase};
pub use client::GalleryClient;
pub use favorites::FavoritesCache;
pub use feed::PaginatedFeed;
pub use identity::{IdentityScope, ScopeToken};
pub use lightbox::{LightboxNavigator, LightboxState};
