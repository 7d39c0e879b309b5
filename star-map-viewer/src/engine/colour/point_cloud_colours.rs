use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::star_map::StarMap;
use crate::engine::assets::system_id::SystemId;
use crate::engine::colour::strategy::{ColourMode, colour_of, grey};
use crate::engine::mesh::point_cloud_mesh::{PointCloud, vertex_colours};
use bevy::prelude::*;
use constants::palette::Rgb;
use constants::render_settings::DIMMED_SYSTEM_GREY;
use std::collections::HashSet;

/// Which systems receive their colour-strategy output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Highlight {
    /// Every system is coloured normally.
    #[default]
    Full,
    /// Only these systems are coloured; the rest are dimmed. Kept by id so a
    /// highlight survives a map reload.
    Members(HashSet<SystemId>),
}

/// One colour per point-cloud slot. Written back to the point-cloud mesh by
/// [`sync_point_cloud_colours`] whenever it changes.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointCloudColours {
    slots: Vec<Rgb>,
    highlight: Highlight,
}

impl PointCloudColours {
    /// Recompute every slot for `mode`, keeping the current highlight.
    pub fn recolour(&mut self, map: &StarMap, mode: ColourMode, metrics: &SystemMetrics) {
        self.slots.clear();
        self.slots.extend(map.systems().iter().map(|system| {
            match &self.highlight {
                Highlight::Members(members) if !members.contains(&system.id) => {
                    grey(DIMMED_SYSTEM_GREY)
                }
                _ => colour_of(mode, system, metrics),
            }
        }));
    }

    /// Dim everything except `members`. Member ids missing from the map
    /// simply match nothing.
    pub fn highlight_members(
        &mut self,
        map: &StarMap,
        mode: ColourMode,
        metrics: &SystemMetrics,
        members: &[SystemId],
    ) {
        self.highlight = Highlight::Members(members.iter().cloned().collect());
        self.recolour(map, mode, metrics);
    }

    /// Return to the full palette. Returns false when nothing was dimmed.
    pub fn restore_full(&mut self, map: &StarMap, mode: ColourMode, metrics: &SystemMetrics) -> bool {
        if !self.is_dimmed() {
            return false;
        }
        self.highlight = Highlight::Full;
        self.recolour(map, mode, metrics);
        true
    }

    pub fn is_dimmed(&self) -> bool {
        matches!(self.highlight, Highlight::Members(_))
    }

    pub fn slots(&self) -> &[Rgb] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.slots.get(index).copied()
    }

    /// Drop all slots and any highlight, used when a map is torn down.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.highlight = Highlight::Full;
    }
}

/// Copy changed slot colours into the point-cloud mesh colour attribute.
pub fn sync_point_cloud_colours(
    colours: Res<PointCloudColours>,
    point_clouds: Query<&Mesh3d, With<PointCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !colours.is_changed() {
        return;
    }

    for mesh_handle in &point_clouds {
        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };

        let expected = mesh.count_vertices();
        let colours = vertex_colours(colours.slots());
        if colours.len() != expected {
            warn!(
                "Point cloud colour buffer has {} vertices, mesh has {}",
                colours.len(),
                expected
            );
            continue;
        }
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);
    }
}
