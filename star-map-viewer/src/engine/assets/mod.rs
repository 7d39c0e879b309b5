//! Static map data as Bevy assets and the in-memory catalogs built from them.
//!
//! Every input is a pre-computed JSON file registered through
//! `JsonAssetPlugin`; nothing is written back.

/// Per-system traffic and kill datasets with normalisation.
pub mod metrics;

/// Aggregate regions that can be selected and zoomed to.
pub mod selectables;

/// Active map catalog with dense point-cloud slots and resolved jump edges.
pub mod star_map;

/// Raw system catalog and jump list file formats.
pub mod system_catalog;

/// Identifier shared by systems and selectables.
pub mod system_id;
