use crate::engine::assets::star_map::StarMap;
use crate::engine::camera::recenter::{MapContent, SceneOffset};
use crate::engine::mesh::jump_lines_mesh::{JumpLines, create_jump_lines_mesh};
use crate::engine::mesh::point_cloud_mesh::{PointCloud, create_point_cloud_mesh};
use crate::tools::view_controls::JumpLinesVisibility;
use bevy::prelude::*;
use constants::coordinate_system::scale_to_render;
use constants::palette::Rgb;
use constants::render_settings::{JUMP_LINE_COLOUR, SYSTEM_SIZE};

/// Spawn the point cloud and, when the map has any, its jump lines. Both sit
/// at the current scene offset.
pub fn spawn_map_content(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    map: &StarMap,
    colours: &[Rgb],
    scene_offset: &SceneOffset,
    jumps_visible: &JumpLinesVisibility,
) {
    spawn_point_cloud_entity(commands, meshes, materials, map, colours, scene_offset);

    if !map.jumps().is_empty() {
        spawn_jump_lines_entity(commands, meshes, materials, map, scene_offset, jumps_visible);
    }
}

fn spawn_point_cloud_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    map: &StarMap,
    colours: &[Rgb],
    scene_offset: &SceneOffset,
) {
    let centres: Vec<Vec3> = map.systems().iter().map(|s| s.render_position).collect();
    let mesh = create_point_cloud_mesh(&centres, scale_to_render(SYSTEM_SIZE), colours);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        // Vertex colours carry the palette; the base colour must stay white.
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(scene_offset.0),
        Visibility::Visible,
        PointCloud,
        MapContent,
        bevy::render::view::NoFrustumCulling,
    ));

    println!("Point cloud entity spawned with {} systems", map.len());
}

fn spawn_jump_lines_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    map: &StarMap,
    scene_offset: &SceneOffset,
    jumps_visible: &JumpLinesVisibility,
) {
    let [r, g, b] = JUMP_LINE_COLOUR;
    commands.spawn((
        Mesh3d(meshes.add(create_jump_lines_mesh(map))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(scene_offset.0),
        jumps_visible.visibility(),
        JumpLines,
        MapContent,
        bevy::render::view::NoFrustumCulling,
    ));

    println!("Jump lines spawned with {} edges", map.jumps().len());
}
