use crate::engine::assets::system_id::SystemId;
use bevy::prelude::*;
use constants::coordinate_system::{scale_to_render, to_render_space};
use serde::Deserialize;
use std::collections::HashMap;

/// Aggregate map entry (region, constellation, map overview) that can be
/// selected and zoomed to but is not itself a system.
#[derive(Debug, Clone, Deserialize)]
pub struct Selectable {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Height above the aggregate the camera settles at, in world units.
    pub distance: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub security: Option<f32>,
    #[serde(default)]
    pub whclass: Option<String>,
    /// Member systems; present only for cluster aggregates.
    #[serde(default)]
    pub systems: Option<Vec<SystemId>>,
}

impl Selectable {
    pub fn render_position(&self) -> Vec3 {
        to_render_space(self.x, self.y, self.z)
    }

    pub fn zoom_distance(&self) -> f32 {
        scale_to_render(self.distance)
    }

    pub fn members(&self) -> Option<&[SystemId]> {
        self.systems.as_deref()
    }
}

#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct SelectableCatalogFile(pub HashMap<SystemId, Selectable>);

/// Loaded selectables, independent of the active map.
#[derive(Resource, Debug, Default, Clone)]
pub struct Selectables {
    entries: HashMap<SystemId, Selectable>,
}

impl Selectables {
    pub fn from_file(file: &SelectableCatalogFile) -> Self {
        Self {
            entries: file.0.clone(),
        }
    }

    pub fn get(&self, id: &SystemId) -> Option<&Selectable> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &SystemId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
