use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{
    ORBIT_PAN_SENSITIVITY, ORBIT_ROTATE_SENSITIVITY, ORBIT_ZOOM_STEP,
};
use std::f32::consts::PI;

/// Keeps the camera off the poles so `look_at` always has a usable up axis.
const POLAR_EPSILON: f32 = 1.0e-4;

/// Closest the camera may dolly towards its target.
const MIN_ORBIT_RADIUS: f32 = 1.0e-4;

/// Marker for the single map camera.
#[derive(Component)]
pub struct MapCamera;

/// Orbit camera state: the point being orbited, which user gestures are
/// allowed, and the azimuth range the camera is held to.
#[derive(Resource, Debug, Clone)]
pub struct OrbitController {
    pub target: Vec3,
    pub(crate) enable_pan: bool,
    pub(crate) enable_rotate: bool,
    pub(crate) min_azimuth: f32,
    pub(crate) max_azimuth: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_pan: true,
            enable_rotate: true,
            min_azimuth: f32::NEG_INFINITY,
            max_azimuth: f32::INFINITY,
        }
    }
}

/// Azimuth of an offset from the target, measured around +Y from +Z.
pub fn azimuth_of(offset: Vec3) -> f32 {
    offset.x.atan2(offset.z)
}

/// Angle between an offset and +Y.
pub fn polar_of(offset: Vec3) -> f32 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return 0.0;
    }
    (offset.y / radius).clamp(-1.0, 1.0).acos()
}

fn offset_from_spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    Vec3::new(
        radius * polar.sin() * azimuth.sin(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.cos(),
    )
}

impl OrbitController {
    /// Azimuth the camera is held at, or its current azimuth when unclamped.
    pub fn live_azimuth(&self, camera_position: Vec3) -> f32 {
        if self.min_azimuth == self.max_azimuth && self.min_azimuth.is_finite() {
            self.min_azimuth
        } else {
            azimuth_of(camera_position - self.target)
        }
    }

    /// Pin the azimuth to a single value.
    pub fn set_azimuth_clamp(&mut self, azimuth: f32) {
        self.min_azimuth = azimuth;
        self.max_azimuth = azimuth;
    }

    pub fn clear_azimuth_clamp(&mut self) {
        self.min_azimuth = f32::NEG_INFINITY;
        self.max_azimuth = f32::INFINITY;
    }

    pub fn azimuth_range(&self) -> (f32, f32) {
        (self.min_azimuth, self.max_azimuth)
    }

    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.enable_pan = enabled;
        self.enable_rotate = enabled;
    }

    pub fn interaction_enabled(&self) -> bool {
        self.enable_pan && self.enable_rotate
    }

    /// Re-derive the camera transform from its orbit around `target`,
    /// applying the azimuth range and pole limits.
    pub fn update(&self, transform: &mut Transform) {
        let offset = transform.translation - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let azimuth = azimuth_of(offset).clamp(self.min_azimuth, self.max_azimuth);
        let polar = polar_of(offset).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        transform.translation = self.target + offset_from_spherical(radius, polar, azimuth);
        transform.look_at(self.target, Vec3::Y);
    }

    /// Orbit by pointer movement in pixels. Ignored while rotation is disabled.
    pub fn rotate(&self, transform: &mut Transform, delta: Vec2) {
        if !self.enable_rotate {
            return;
        }
        let offset = transform.translation - self.target;
        let radius = offset.length();
        let azimuth = azimuth_of(offset) - delta.x * ORBIT_ROTATE_SENSITIVITY;
        let polar = (polar_of(offset) - delta.y * ORBIT_ROTATE_SENSITIVITY)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        transform.translation = self.target + offset_from_spherical(radius, polar, azimuth);
    }

    /// Slide target and camera together in the view plane, scaled by distance.
    pub fn pan(&mut self, transform: &mut Transform, delta: Vec2) {
        if !self.enable_pan {
            return;
        }
        let distance = transform.translation.distance(self.target);
        let right = transform.right().as_vec3();
        let up = transform.up().as_vec3();
        let shift = (-right * delta.x + up * delta.y) * distance * ORBIT_PAN_SENSITIVITY;
        self.target += shift;
        transform.translation += shift;
    }

    /// Scale the camera distance by `ORBIT_ZOOM_STEP` per wheel step.
    /// Positive steps move closer.
    pub fn dolly(&self, transform: &mut Transform, steps: f32) {
        let offset = transform.translation - self.target;
        let scaled = offset * ORBIT_ZOOM_STEP.powf(steps);
        if scaled.length() < MIN_ORBIT_RADIUS {
            return;
        }
        transform.translation = self.target + scaled;
    }
}

/// Apply pointer input to the orbit and then the orbit constraint.
/// Left drag orbits, right drag pans, the wheel dollies.
pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<MapCamera>>,
    mut controller: ResMut<OrbitController>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            controller.rotate(&mut transform, mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            controller.pan(&mut transform, mouse_delta);
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        controller.dolly(&mut transform, scroll_accum);
    }

    controller.update(&mut transform);
}
