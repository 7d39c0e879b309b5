//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, frame ordering,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loaders, map systems and
/// platform-specific configurations.
pub mod app_setup;

/// Application state machine and loading progress transitions.
pub mod app_state;

/// Ordered per-frame system sets and the camera transition driver.
pub mod frame_scheduler;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
