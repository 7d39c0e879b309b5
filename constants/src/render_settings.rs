/// Astronomical unit in metres.
pub const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;

/// Radius of a single system sphere in world units. Also the picking radius.
pub const SYSTEM_SIZE: f64 = 25.0 * 250.0 * ASTRONOMICAL_UNIT;

/// Selection halo radius relative to a system sphere.
pub const SELECTION_HALO_FACTOR: f32 = 1.5;

/// Duration of every programmatic camera move, in seconds.
pub const TRANSITION_DURATION_SECS: f32 = 0.25;

pub const CAMERA_FOV_DEGREES: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.005;
pub const CAMERA_FAR: f32 = 5000.0;

/// Initial camera height above the render origin.
pub const CAMERA_START_HEIGHT: f32 = 2.0;

/// Grey level for systems outside the selected cluster.
pub const DIMMED_SYSTEM_GREY: f32 = 0.05;

pub const JUMP_LINE_COLOUR: [f32; 3] = [0.0, 0.0, 1.0];

pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_PAN_SENSITIVITY: f32 = 0.0015;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;
