//! Asynchronous loading of map data through the asset server.
//!
//! Map catalogs are reloaded per variant; selectables and metrics load once
//! at startup. Every load is single-attempt; failures leave the affected data
//! empty and are logged.

/// Map load requests, teardown of the previous map, and generation tracking.
pub mod map_loader;

/// Known map variants and where their files live.
pub mod map_variant;

/// Point cloud and jump line entity spawning.
pub mod point_cloud_creator;

/// Loading milestones used for the state transition to running.
pub mod progress;

/// Selectables and metric datasets shared by every map.
pub mod static_data_loader;
