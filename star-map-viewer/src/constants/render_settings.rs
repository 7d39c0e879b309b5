use bevy::color::Color;
use bevy::math::Vec2;

pub const LABEL_NAME_FONT_SIZE: f32 = 14.0;
pub const LABEL_SECONDARY_FONT_SIZE: f32 = 12.0;

/// Screen-space offset from a projected point to its label's top-left corner.
/// Labels sit above and to the right of the point.
pub const LABEL_OFFSET_PX: Vec2 = Vec2::new(8.0, -36.0);

pub const HOVER_LABEL_COLOUR: Color = Color::srgb(0.85, 0.85, 0.85);
pub const SELECTION_LABEL_COLOUR: Color = Color::WHITE;

/// Halo drawn around the selected system.
pub const HALO_COLOUR: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);

/// Seconds between `fps_update` notifications.
pub const FPS_NOTIFICATION_INTERVAL_SECS: f32 = 0.5;
