use crate::constants::path::{KILLS_PATH, SELECTABLES_PATH, TRAFFIC_PATH};
use crate::engine::assets::metrics::{KillsFile, SystemMetrics, TrafficFile};
use crate::engine::assets::selectables::{SelectableCatalogFile, Selectables};
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::LoadState;
use bevy::prelude::*;

/// Final state of a single-attempt load.
pub enum Settled<'a, T> {
    Loaded(&'a T),
    /// Path and loader error of the failed load.
    Failed(String),
}

/// `None` while the load is still in flight. Failures are not logged here:
/// a caller may poll a failed handle for several frames while its siblings
/// finish, and reports it once through [`Settled::report`].
pub fn settle<'a, T: Asset>(
    asset_server: &AssetServer,
    handle: &Handle<T>,
    assets: &'a Assets<T>,
) -> Option<Settled<'a, T>> {
    if let Some(asset) = assets.get(handle) {
        return Some(Settled::Loaded(asset));
    }
    match asset_server.get_load_state(handle) {
        Some(LoadState::Failed(error)) => Some(Settled::Failed(format!(
            "{}: {}",
            handle
                .path()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<unnamed asset>".to_string()),
            error
        ))),
        _ => None,
    }
}

impl<'a, T> Settled<'a, T> {
    /// The loaded asset, logging the failure otherwise. Call once per load,
    /// when the caller is done waiting on it.
    pub fn report(self) -> Option<&'a T> {
        match self {
            Self::Loaded(asset) => Some(asset),
            Self::Failed(reason) => {
                error!("Failed to load {}", reason);
                None
            }
        }
    }
}

/// Handles for the data shared by every map: selectables and the metric
/// datasets.
#[derive(Resource, Default)]
pub struct StaticDataLoader {
    selectables: Option<Handle<SelectableCatalogFile>>,
    traffic: Option<Handle<TrafficFile>>,
    kills: Option<Handle<KillsFile>>,
}

pub fn start_static_loading(mut loader: ResMut<StaticDataLoader>, asset_server: Res<AssetServer>) {
    println!("Loading selectables from: {}", SELECTABLES_PATH);
    loader.selectables = Some(asset_server.load(SELECTABLES_PATH));
    println!("Loading metrics from: {}, {}", TRAFFIC_PATH, KILLS_PATH);
    loader.traffic = Some(asset_server.load(TRAFFIC_PATH));
    loader.kills = Some(asset_server.load(KILLS_PATH));
}

/// Publish the selectables once their file settles. A failed load leaves the
/// set empty, so aggregate ids resolve as unknown.
pub fn finish_selectables_load(
    mut loader: ResMut<StaticDataLoader>,
    mut progress: ResMut<LoadingProgress>,
    mut selectables: ResMut<Selectables>,
    asset_server: Res<AssetServer>,
    files: Res<Assets<SelectableCatalogFile>>,
) {
    let Some(handle) = loader.selectables.as_ref() else {
        return;
    };
    let Some(settled) = settle(&asset_server, handle, &files) else {
        return;
    };

    if let Some(file) = settled.report() {
        *selectables = Selectables::from_file(file);
        println!("✓ {} selectables loaded", selectables.len());
    }
    loader.selectables = None;
    progress.selectables_loaded = true;
}

/// Build the metric datasets once both files settle and enable the metric
/// colour modes. A failed file contributes an empty dataset.
pub fn finish_metrics_load(
    mut loader: ResMut<StaticDataLoader>,
    mut metrics: ResMut<SystemMetrics>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
    traffic_files: Res<Assets<TrafficFile>>,
    kills_files: Res<Assets<KillsFile>>,
) {
    let (Some(traffic), Some(kills)) = (loader.traffic.as_ref(), loader.kills.as_ref()) else {
        return;
    };
    let (Some(traffic), Some(kills)) = (
        settle(&asset_server, traffic, &traffic_files),
        settle(&asset_server, kills, &kills_files),
    ) else {
        return;
    };

    *metrics = SystemMetrics::from_files(traffic.report(), kills.report());
    println!(
        "✓ Metrics loaded: {} traffic entries, {} kill entries",
        metrics.traffic.len(),
        metrics.ship_kills.len()
    );

    loader.traffic = None;
    loader.kills = None;
    rpc_interface.send_notification("colour_modes_enabled", serde_json::json!({}));
}
