//! Scene decorations that are not part of the point cloud.

/// Back-faced shell around the selected system.
pub mod halo;

/// Hover and selection labels projected onto the UI.
pub mod labels;
