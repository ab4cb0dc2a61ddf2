//! Wire-level shapes for the picfolio backend.
//!
//! This crate is the single source of truth for what the backend actually
//! returns: tuple-shaped listing rows, grouped photo pages, and the literal
//! success strings its mutating endpoints acknowledge with. The sync core is
//! written against [`RemoteGateway`]; the HTTP implementation lives in
//! `picfolio-api-client`.

pub mod ack;
pub mod gateway;
pub mod wire;

pub use gateway::RemoteGateway;
pub use wire::{
    favorite_ids, groups_from_listing, AlbumRow, FavoriteGroup, FavoritesListing, PageGroup,
    PageListing, PhotoTuple,
};
