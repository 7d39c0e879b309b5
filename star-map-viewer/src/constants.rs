/// Asset locations and detail page addressing.
pub mod path;

/// Overlay and notification settings for the viewer.
pub mod render_settings;
