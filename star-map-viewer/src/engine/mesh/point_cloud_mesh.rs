use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use constants::palette::Rgb;

#[derive(Component)]
pub struct PointCloud;

/// Each system is an octahedron: one vertex per axis direction.
pub const VERTICES_PER_SYSTEM: usize = 6;

const OCTAHEDRON_DIRECTIONS: [Vec3; VERTICES_PER_SYSTEM] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Counter-clockwise faces seen from outside.
const OCTAHEDRON_FACES: [[u32; 3]; 8] = [
    [0, 2, 4],
    [4, 2, 1],
    [1, 2, 5],
    [5, 2, 0],
    [4, 3, 0],
    [1, 3, 4],
    [5, 3, 1],
    [0, 3, 5],
];

/// Build one merged mesh holding a small octahedron per system, in slot order.
/// Slot `i` owns vertices `i * VERTICES_PER_SYSTEM ..`.
pub fn create_point_cloud_mesh(centres: &[Vec3], radius: f32, colours: &[Rgb]) -> Mesh {
    let vertex_count = centres.len() * VERTICES_PER_SYSTEM;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(centres.len() * OCTAHEDRON_FACES.len() * 3);

    for (slot, centre) in centres.iter().enumerate() {
        let base = (slot * VERTICES_PER_SYSTEM) as u32;
        for direction in OCTAHEDRON_DIRECTIONS {
            positions.push((*centre + direction * radius).to_array());
            normals.push(direction.to_array());
        }
        for face in OCTAHEDRON_FACES {
            indices.extend(face.iter().map(|corner| base + corner));
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, padded_colours(colours, centres.len()));
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Expand slot colours to per-vertex RGBA.
pub fn vertex_colours(slots: &[Rgb]) -> Vec<[f32; 4]> {
    slots
        .iter()
        .flat_map(|[r, g, b]| std::iter::repeat_n([*r, *g, *b, 1.0], VERTICES_PER_SYSTEM))
        .collect()
}

/// Slots without a colour yet render white.
fn padded_colours(colours: &[Rgb], slot_count: usize) -> Vec<[f32; 4]> {
    let mut slots: Vec<Rgb> = colours.iter().copied().take(slot_count).collect();
    slots.resize(slot_count, [1.0, 1.0, 1.0]);
    vertex_colours(&slots)
}
