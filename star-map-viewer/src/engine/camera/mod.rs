//! Map camera: orbit controls, programmatic transitions, and scene
//! re-centring once a transition lands.

/// Orbit controller resource and pointer input.
pub mod orbit_controller;

/// Scene offset and the re-centre completion callback.
pub mod recenter;

/// Single in-flight camera transition with typed channels.
pub mod transition;
