use crate::engine::assets::system_id::SystemId;
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One system entry as it appears in a map catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(rename = "solarSystemName")]
    pub solar_system_name: String,
    #[serde(default)]
    pub security: Option<f32>,
    #[serde(default)]
    pub whclass: Option<String>,
}

/// Map catalog as a Bevy asset, keyed by system id.
/// Ordered map so slot assignment is deterministic for a given file.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct SystemCatalogFile(pub BTreeMap<SystemId, SystemRecord>);

/// Jump-edge list as a Bevy asset: pairs of system ids.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct JumpListFile(pub Vec<[SystemId; 2]>);
