use crate::engine::assets::star_map::StarMap;
use crate::engine::camera::orbit_controller::MapCamera;
use crate::engine::camera::recenter::SceneOffset;
use crate::tools::ray::ray_sphere_hit_t;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::coordinate_system::scale_to_render;
use constants::render_settings::SYSTEM_SIZE;

/// Screen rectangle of the rendered map, in the pointer's coordinate space.
/// `top` and `bottom` follow the window convention (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ViewportRect {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            left: 0.0,
            right: size.x,
            top: 0.0,
            bottom: size.y,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        ((self.right - self.left) / (self.bottom - self.top)).abs()
    }
}

/// Pointer position to normalised device coordinates. `y` is measured from
/// the bottom edge, so the top of the viewport is +1.
pub fn pointer_to_ndc(pointer: Vec2, viewport: &ViewportRect) -> Vec2 {
    Vec2::new(
        (pointer.x - viewport.left) / (viewport.right - viewport.left) * 2.0 - 1.0,
        (pointer.y - viewport.bottom) / (viewport.top - viewport.bottom) * 2.0 - 1.0,
    )
}

/// Perspective ray from the camera through an NDC point.
pub fn camera_ray(
    ndc: Vec2,
    camera_transform: &GlobalTransform,
    fov_y: f32,
    aspect_ratio: f32,
) -> Option<Ray3d> {
    let half_height = (fov_y * 0.5).tan();
    let local = Vec3::new(ndc.x * half_height * aspect_ratio, ndc.y * half_height, -1.0);
    let direction = Dir3::new(camera_transform.affine().transform_vector3(local)).ok()?;
    Some(Ray3d::new(camera_transform.translation(), direction))
}

/// Render-space radius every system is picked with.
pub fn pick_radius() -> f32 {
    scale_to_render(SYSTEM_SIZE)
}

/// Index of the nearest sphere hit by `ray`. Equal distances keep the lowest
/// index.
pub fn pick_nearest(
    ray: Ray3d,
    centres: impl IntoIterator<Item = Vec3>,
    radius: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, centre) in centres.into_iter().enumerate() {
        let Some(t) = ray_sphere_hit_t(ray.origin, *ray.direction, centre, radius) else {
            continue;
        };
        if best.is_none_or(|(_, best_t)| t < best_t) {
            best = Some((index, t));
        }
    }
    best.map(|(index, _)| index)
}

/// Resolve a pointer position to the point-cloud slot under it.
pub fn pick(
    pointer: Vec2,
    viewport: &ViewportRect,
    camera_transform: &GlobalTransform,
    fov_y: f32,
    map: &StarMap,
    scene_offset: &SceneOffset,
) -> Option<usize> {
    let ndc = pointer_to_ndc(pointer, viewport);
    let ray = camera_ray(ndc, camera_transform, fov_y, viewport.aspect_ratio())?;
    let centres = map
        .systems()
        .iter()
        .map(|system| scene_offset.to_scene(system.render_position));
    pick_nearest(ray, centres, pick_radius())
}

/// Pick under the primary window's cursor with the map camera.
pub fn pick_under_cursor(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&GlobalTransform, &Projection), With<MapCamera>>,
    map: &StarMap,
    scene_offset: &SceneOffset,
) -> Option<usize> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera_transform, projection) = camera_query.single().ok()?;
    let Projection::Perspective(perspective) = projection else {
        return None;
    };

    let viewport = ViewportRect::from_size(window.size());
    pick(
        cursor,
        &viewport,
        camera_transform,
        perspective.fov,
        map,
        scene_offset,
    )
}
