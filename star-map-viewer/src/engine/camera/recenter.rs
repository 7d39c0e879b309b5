use crate::engine::camera::orbit_controller::{MapCamera, OrbitController};
use crate::engine::camera::transition::TransitionCallback;
use crate::engine::scene::halo::SelectionHalo;
use bevy::prelude::*;

/// Translation applied to all map content. Render-space anchors plus this
/// offset give scene positions.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneOffset(pub Vec3);

impl SceneOffset {
    pub fn to_scene(&self, render_position: Vec3) -> Vec3 {
        render_position + self.0
    }
}

/// Marker for entities positioned at the scene offset (point cloud, jump lines).
#[derive(Component)]
pub struct MapContent;

/// Shift the scene so the orbit target becomes the origin, keeping the view
/// unchanged, then show or hide the selection halo.
pub fn recenter_on_orbit_target(world: &mut World, show_halo: bool) {
    let target = std::mem::take(&mut world.resource_mut::<OrbitController>().target);
    let offset = {
        let mut scene_offset = world.resource_mut::<SceneOffset>();
        scene_offset.0 -= target;
        scene_offset.0
    };

    let mut cameras = world.query_filtered::<&mut Transform, With<MapCamera>>();
    for mut transform in cameras.iter_mut(world) {
        transform.translation -= target;
    }

    let mut content =
        world.query_filtered::<&mut Transform, (With<MapContent>, Without<MapCamera>)>();
    for mut transform in content.iter_mut(world) {
        transform.translation = offset;
    }

    let mut halos = world.query_filtered::<&mut Visibility, With<SelectionHalo>>();
    for mut visibility in halos.iter_mut(world) {
        *visibility = if show_halo {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Completion callback that re-centres the scene.
pub fn recenter_callback(show_halo: bool) -> TransitionCallback {
    Box::new(move |world: &mut World| recenter_on_orbit_target(world, show_halo))
}
