//! Generated meshes for the star map.

/// Stargate connections as a line list.
pub mod jump_lines_mesh;

/// Merged per-system geometry with slot-addressed vertex colours.
pub mod point_cloud_mesh;
