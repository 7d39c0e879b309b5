//! Point-cloud colouring: the per-mode colour strategy, the slot buffer that
//! feeds the mesh, and the label text that accompanies each mode.

/// Secondary label lines for systems and selectables.
pub mod label_text;

/// Slot colour buffer with cluster dimming.
pub mod point_cloud_colours;

/// Colour modes and the per-system colour function.
pub mod strategy;
