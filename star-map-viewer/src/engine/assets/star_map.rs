use crate::engine::assets::system_catalog::{JumpListFile, SystemCatalogFile, SystemRecord};
use crate::engine::assets::system_id::SystemId;
use bevy::prelude::*;
use constants::coordinate_system::to_render_space;
use std::collections::HashMap;

/// A loaded star system with its point-cloud slot.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub render_position: Vec3,
    pub security: Option<f32>,
    pub whclass: Option<String>,
    /// Dense slot in the point cloud, stable for the lifetime of the map.
    pub index: usize,
}

impl StarSystem {
    fn from_record(id: SystemId, record: &SystemRecord, index: usize) -> Self {
        Self {
            id,
            name: record.solar_system_name.clone(),
            render_position: to_render_space(record.x, record.y, record.z),
            security: record.security,
            whclass: record.whclass.clone(),
            index,
        }
    }

    /// Wormhole class number in [1, 6], if the class label carries one.
    pub fn wormhole_class(&self) -> Option<u8> {
        parse_wormhole_class(self.whclass.as_deref()?)
    }
}

/// Parse a class label such as `C3` into its class number.
/// Labels outside C1..C6 (shattered, Thera, drifter holes) yield `None`.
pub fn parse_wormhole_class(label: &str) -> Option<u8> {
    let digits = label.trim().trim_start_matches(['C', 'c']);
    let class: u8 = digits.parse().ok()?;
    (1..=6).contains(&class).then_some(class)
}

/// Jump edge resolved to point-cloud slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEdge {
    pub from: usize,
    pub to: usize,
}

/// In-memory catalog for the active map.
#[derive(Resource, Debug, Clone, Default)]
pub struct StarMap {
    systems: Vec<StarSystem>,
    lookup: HashMap<SystemId, usize>,
    jumps: Vec<JumpEdge>,
}

impl StarMap {
    /// Build the catalog and assign slots in catalog iteration order.
    pub fn from_catalog(catalog: &SystemCatalogFile) -> Self {
        let systems: Vec<StarSystem> = catalog
            .0
            .iter()
            .enumerate()
            .map(|(index, (id, record))| StarSystem::from_record(id.clone(), record, index))
            .collect();
        let lookup = systems.iter().map(|s| (s.id.clone(), s.index)).collect();

        Self {
            systems,
            lookup,
            jumps: Vec::new(),
        }
    }

    /// Resolve jump pairs against the catalog. Pairs naming unknown systems
    /// are skipped and counted.
    pub fn attach_jumps(&mut self, jumps: &JumpListFile) -> usize {
        let mut skipped = 0;
        self.jumps.clear();
        for [a, b] in &jumps.0 {
            match (self.lookup.get(a), self.lookup.get(b)) {
                (Some(&from), Some(&to)) => self.jumps.push(JumpEdge { from, to }),
                _ => skipped += 1,
            }
        }
        skipped
    }

    pub fn get(&self, id: &SystemId) -> Option<&StarSystem> {
        self.lookup.get(id).map(|&index| &self.systems[index])
    }

    pub fn contains(&self, id: &SystemId) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn index_of(&self, id: &SystemId) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn by_index(&self, index: usize) -> Option<&StarSystem> {
        self.systems.get(index)
    }

    /// Systems in slot order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn jumps(&self) -> &[JumpEdge] {
        &self.jumps
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
