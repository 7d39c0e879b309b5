use crate::engine::assets::star_map::StarMap;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;

/// Marker for the stargate line segments of the active map.
#[derive(Component)]
pub struct JumpLines;

/// Line list with two vertices per jump edge, in render space.
pub fn create_jump_lines_mesh(map: &StarMap) -> Mesh {
    let positions: Vec<[f32; 3]> = map
        .jumps()
        .iter()
        .filter_map(|edge| {
            let from = map.by_index(edge.from)?;
            let to = map.by_index(edge.to)?;
            Some([from.render_position.to_array(), to.render_position.to_array()])
        })
        .flatten()
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::system_catalog::{JumpListFile, SystemCatalogFile};

    #[test]
    fn one_segment_per_edge() {
        let catalog: SystemCatalogFile = serde_json::from_str(
            r#"{
                "1": {"x": 0, "y": 0, "z": 0, "solarSystemName": "A"},
                "2": {"x": 1e18, "y": 0, "z": 0, "solarSystemName": "B"},
                "3": {"x": 0, "y": 1e18, "z": 0, "solarSystemName": "C"}
            }"#,
        )
        .unwrap();
        let mut map = StarMap::from_catalog(&catalog);
        let jumps: JumpListFile = serde_json::from_str("[[1, 2], [2, 3]]").unwrap();
        map.attach_jumps(&jumps);

        let mesh = create_jump_lines_mesh(&map);
        assert_eq!(mesh.count_vertices(), 4);
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineList);
    }
}
