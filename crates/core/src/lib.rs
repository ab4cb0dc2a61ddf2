//! Domain types shared across the picfolio client.
//!
//! Everything here is plain data plus pure functions: no I/O, no async. The
//! sync core (`picfolio-sync`) owns mutation of these values; the gateway
//! crates only construct them from wire responses.

pub mod album;
pub mod error;
pub mod feed;
pub mod ids;
pub mod photo;
pub mod validate;

pub use album::{AlbumDetail, AlbumSummary};
pub use error::GalleryError;
pub use feed::FeedCursor;
pub use photo::{DateGroup, PhotoRef};
