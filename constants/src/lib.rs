//! Shared constants for the star map viewer.
//!
//! World-to-render scaling, per-system display sizes, and the fixed colour
//! palettes used by the security colouring mode.

/// World-space to render-space coordinate conversion.
pub mod coordinate_system;

/// Security and wormhole-class colour palettes.
pub mod palette;

/// Camera, transition, and mesh sizing settings.
pub mod render_settings;
