use crate::engine::assets::system_id::SystemId;
use crate::engine::colour::strategy::ColourMode;
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct TrafficEntry {
    pub system_id: SystemId,
    pub ship_jumps: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KillEntry {
    pub system_id: SystemId,
    pub ship_kills: u64,
    pub npc_kills: u64,
}

/// Per-system jump counts as a Bevy asset.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct TrafficFile(pub Vec<TrafficEntry>);

/// Per-system kill counts as a Bevy asset. Feeds two metrics.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct KillsFile(pub Vec<KillEntry>);

/// Non-negative per-system counts plus their maximum.
/// An empty dataset has no maximum and normalises every system to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerSystemMetric {
    values: HashMap<SystemId, u64>,
    max: Option<u64>,
}

impl PerSystemMetric {
    pub fn from_entries(entries: impl IntoIterator<Item = (SystemId, u64)>) -> Self {
        let values: HashMap<SystemId, u64> = entries.into_iter().collect();
        let max = values.values().copied().max();
        Self { values, max }
    }

    /// Count for a system, zero when the dataset has no entry.
    pub fn get(&self, id: &SystemId) -> u64 {
        self.values.get(id).copied().unwrap_or(0)
    }

    /// Fraction of the global maximum in [0, 1]; zero when the maximum is
    /// absent or zero.
    pub fn fraction(&self, id: &SystemId) -> f32 {
        match self.max {
            Some(max) if max > 0 => (self.get(id) as f64 / max as f64).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The auxiliary datasets used by the metric colour modes.
#[derive(Resource, Debug, Clone, Default)]
pub struct SystemMetrics {
    pub traffic: PerSystemMetric,
    pub ship_kills: PerSystemMetric,
    pub npc_kills: PerSystemMetric,
    /// Set once both files have settled, even if one failed.
    pub loaded: bool,
}

impl SystemMetrics {
    /// Build from loaded files. A missing file contributes an empty dataset.
    pub fn from_files(traffic: Option<&TrafficFile>, kills: Option<&KillsFile>) -> Self {
        let traffic = traffic
            .map(|file| {
                PerSystemMetric::from_entries(
                    file.0.iter().map(|e| (e.system_id.clone(), e.ship_jumps)),
                )
            })
            .unwrap_or_default();

        let (ship_kills, npc_kills) = kills
            .map(|file| {
                (
                    PerSystemMetric::from_entries(
                        file.0.iter().map(|e| (e.system_id.clone(), e.ship_kills)),
                    ),
                    PerSystemMetric::from_entries(
                        file.0.iter().map(|e| (e.system_id.clone(), e.npc_kills)),
                    ),
                )
            })
            .unwrap_or_default();

        Self {
            traffic,
            ship_kills,
            npc_kills,
            loaded: true,
        }
    }

    /// Whether the metric datasets have finished loading (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Dataset backing a metric colour mode; `None` for security.
    pub fn for_mode(&self, mode: ColourMode) -> Option<&PerSystemMetric> {
        match mode {
            ColourMode::Security => None,
            ColourMode::Traffic => Some(&self.traffic),
            ColourMode::ShipKills => Some(&self.ship_kills),
            ColourMode::NpcKills => Some(&self.npc_kills),
        }
    }
}
