use crate::constants::render_settings::HALO_COLOUR;
use bevy::prelude::*;
use bevy::render::render_resource::Face;
use constants::coordinate_system::scale_to_render;
use constants::render_settings::{SELECTION_HALO_FACTOR, SYSTEM_SIZE};

/// Shell drawn around the selected system. It lives at the scene origin,
/// which is where a system sits after its selection transition lands.
#[derive(Component)]
pub struct SelectionHalo;

pub fn halo_radius() -> f32 {
    SELECTION_HALO_FACTOR * scale_to_render(SYSTEM_SIZE)
}

/// Spawn the hidden halo. Only back faces are drawn so the system inside stays
/// visible.
pub fn spawn_selection_halo(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(halo_radius()).mesh().uv(24, 12))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: HALO_COLOUR,
            alpha_mode: AlphaMode::Blend,
            cull_mode: Some(Face::Front),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        SelectionHalo,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halo_is_larger_than_a_system() {
        let system_radius = scale_to_render(SYSTEM_SIZE);
        assert!(halo_radius() > system_radius);
        assert!((halo_radius() / system_radius - 1.5).abs() < 1e-5);
    }
}
