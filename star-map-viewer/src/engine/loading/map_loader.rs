use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::star_map::StarMap;
use crate::engine::assets::system_id::SystemId;
use crate::engine::assets::system_catalog::{JumpListFile, SystemCatalogFile};
use crate::engine::camera::recenter::{MapContent, SceneOffset};
use crate::engine::colour::point_cloud_colours::PointCloudColours;
use crate::engine::loading::map_variant::MapVariant;
use crate::engine::loading::point_cloud_creator::spawn_map_content;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::static_data_loader::{Settled, settle};
use crate::engine::scene::labels::{LabelKind, MapLabels};
use crate::engine::systems::colour_mode::ColourModeState;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::selection::{SelectItemEvent, SelectionSource, SelectionState};
use crate::tools::view_controls::JumpLinesVisibility;
use bevy::prelude::*;

/// Request to replace the active map.
#[derive(Event, Debug, Clone, Copy)]
pub struct LoadMapEvent {
    pub variant: MapVariant,
}

struct PendingMap {
    generation: u64,
    variant: MapVariant,
    catalog: Handle<SystemCatalogFile>,
    jumps: Option<Handle<JumpListFile>>,
}

/// Tracks map loads. Every load gets a new generation; only the newest
/// generation is ever spawned.
#[derive(Resource, Default)]
pub struct MapLoader {
    generation: u64,
    pending: Vec<PendingMap>,
    /// Overview selectable of the newest load, until it has been selected.
    overview: Option<SystemId>,
}

impl MapLoader {
    /// Start loading `variant` and return its generation.
    pub fn begin(&mut self, variant: MapVariant, asset_server: &AssetServer) -> u64 {
        self.generation += 1;
        let catalog_path = variant.catalog_path();
        println!("Loading map catalog from: {}", catalog_path);

        self.pending.push(PendingMap {
            generation: self.generation,
            variant,
            catalog: asset_server.load(catalog_path),
            jumps: variant.jumps_path().map(|path| asset_server.load(path)),
        });
        self.overview = Some(variant.overview_id());
        self.generation
    }

}

pub fn start_loading(mut loader: ResMut<MapLoader>, asset_server: Res<AssetServer>) {
    loader.begin(MapVariant::default(), &asset_server);
}

/// Move to the newest load's overview selectable. Waits for the selectables
/// so the first load can resolve it too.
pub fn request_overview_selection(
    mut loader: ResMut<MapLoader>,
    progress: Res<LoadingProgress>,
    mut select_events: EventWriter<SelectItemEvent>,
) {
    if !progress.selectables_loaded {
        return;
    }
    if let Some(id) = loader.overview.take() {
        select_events.write(SelectItemEvent {
            id,
            source: SelectionSource::MapLoad,
        });
    }
}

/// Tear down the active map and start loading the requested one. The overview
/// selection that follows moves the camera and points the detail frame at the
/// variant's page.
pub fn handle_load_map_events(
    mut events: EventReader<LoadMapEvent>,
    mut loader: ResMut<MapLoader>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    content: Query<
        (
            Entity,
            &Mesh3d,
            Option<&MeshMaterial3d<StandardMaterial>>,
        ),
        With<MapContent>,
    >,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut map: ResMut<StarMap>,
    mut colours: ResMut<PointCloudColours>,
    mut labels: ResMut<MapLabels>,
    mut selection: ResMut<SelectionState>,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    for (entity, mesh, material) in &content {
        meshes.remove(&mesh.0);
        if let Some(material) = material {
            materials.remove(&material.0);
        }
        commands.entity(entity).despawn();
    }

    *map = StarMap::default();
    colours.clear();
    selection.clear();
    labels.hide(LabelKind::Selection);
    labels.hide(LabelKind::Hover);

    let generation = loader.begin(event.variant, &asset_server);
    info!(
        "Loading map variant {} (generation {})",
        event.variant.as_str(),
        generation
    );
}

/// Build and spawn the newest pending map once its files settle. Superseded
/// loads are dropped whenever they finish.
pub fn finish_map_load(
    mut loader: ResMut<MapLoader>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<SystemCatalogFile>>,
    jump_lists: Res<Assets<JumpListFile>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut map: ResMut<StarMap>,
    mut colours: ResMut<PointCloudColours>,
    (colour_mode, metrics, scene_offset, jumps_visible): (
        Res<ColourModeState>,
        Res<SystemMetrics>,
        Res<SceneOffset>,
        Res<JumpLinesVisibility>,
    ),
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let current = loader.generation;
    loader.pending.retain(|pending| {
        if pending.generation == current {
            return true;
        }
        info!(
            "Discarding superseded load of {} (generation {})",
            pending.variant.as_str(),
            pending.generation
        );
        false
    });

    let Some(pending) = loader.pending.first() else {
        return;
    };
    let Some(catalog) = settle(&asset_server, &pending.catalog, &catalogs) else {
        return;
    };
    let jumps = match &pending.jumps {
        Some(handle) => {
            let Some(settled) = settle(&asset_server, handle, &jump_lists) else {
                return;
            };
            Some(settled)
        }
        None => None,
    };

    let variant = pending.variant;
    let jumps = jumps.and_then(Settled::report);
    let Some(catalog) = catalog.report() else {
        error!("Map {} has no catalog; nothing to show", variant.as_str());
        loader.pending.clear();
        return;
    };

    let mut loaded = StarMap::from_catalog(catalog);
    if let Some(jumps) = jumps {
        let skipped = loaded.attach_jumps(jumps);
        if skipped > 0 {
            warn!("Skipped {} jumps naming systems outside {}", skipped, variant.as_str());
        }
    }

    // Keep any cluster highlight requested while the catalog was loading.
    colours.recolour(&loaded, colour_mode.current_mode, &metrics);
    spawn_map_content(
        &mut commands,
        &mut meshes,
        &mut materials,
        &loaded,
        colours.slots(),
        &scene_offset,
        &jumps_visible,
    );

    println!("✓ Map {} ready with {} systems", variant.as_str(), loaded.len());
    rpc_interface.send_notification(
        "map_loaded",
        serde_json::json!({
            "map": variant.as_str(),
            "systems": loaded.len(),
        }),
    );

    *map = loaded;
    loader.pending.clear();
    progress.map_spawned = true;
}
