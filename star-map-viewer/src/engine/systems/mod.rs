//! Runtime systems for colouring control and diagnostics.

/// Colour mode state, requests and the full recolour they trigger.
///
/// Handles keyboard input (native) or RPC requests (WASM) for the four modes.
pub mod colour_mode;

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates native UI overlays.
pub mod fps_tracking;
