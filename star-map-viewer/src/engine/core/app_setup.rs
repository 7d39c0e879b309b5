use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_HEIGHT};
// Crate engine modules
use crate::engine::assets::metrics::{KillsFile, SystemMetrics, TrafficFile};
use crate::engine::assets::selectables::{SelectableCatalogFile, Selectables};
use crate::engine::assets::star_map::StarMap;
use crate::engine::assets::system_catalog::{JumpListFile, SystemCatalogFile};
use crate::engine::camera::orbit_controller::{MapCamera, orbit_camera_controller};
use crate::engine::camera::recenter::SceneOffset;
use crate::engine::colour::point_cloud_colours::{PointCloudColours, sync_point_cloud_colours};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::frame_scheduler::{FrameSchedulerPlugin, MapFrameSet};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::map_loader::{
    LoadMapEvent, MapLoader, finish_map_load, handle_load_map_events, request_overview_selection,
    start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::static_data_loader::{
    StaticDataLoader, finish_metrics_load, finish_selectables_load, start_static_loading,
};
use crate::engine::scene::halo::spawn_selection_halo;
use crate::engine::scene::labels::{MapLabels, position_labels, refresh_label_text, spawn_labels};
use crate::engine::systems::colour_mode::{
    ColourModeEvent, ColourModeState, handle_colour_mode_events,
};
use crate::engine::systems::fps_tracking::{FpsReporter, fps_notification_system};
// Crate tools modules
use crate::tools::hover::update_hover_label;
use crate::tools::selection::{
    SelectItemEvent, SelectionState, handle_select_item_events, select_on_click,
};
use crate::tools::view_controls::{
    JumpLinesVisibility, ResetCameraEvent, SetJumpsVisibleEvent, apply_jump_lines_visibility,
    handle_reset_camera_events, handle_set_jumps_visible_events,
};
// Web RPC modules
use crate::rpc::detail_frame::DetailFrame;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::colour_mode::colour_mode_shortcuts;
#[cfg(not(target_arch = "wasm32"))]
use crate::tools::view_controls::view_shortcuts;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Every data file is JSON; loaders are picked by the requested asset type.
        .add_plugins(JsonAssetPlugin::<SystemCatalogFile>::new(&["json"]))
        .add_plugins(JsonAssetPlugin::<JumpListFile>::new(&["json"]))
        .add_plugins(JsonAssetPlugin::<SelectableCatalogFile>::new(&["json"]))
        .add_plugins(JsonAssetPlugin::<TrafficFile>::new(&["json"]))
        .add_plugins(JsonAssetPlugin::<KillsFile>::new(&["json"]))
        .add_plugins(FrameSchedulerPlugin)
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<MapLoader>()
        .init_resource::<StaticDataLoader>()
        .init_resource::<StarMap>()
        .init_resource::<Selectables>()
        .init_resource::<SystemMetrics>()
        .init_resource::<SelectionState>()
        .init_resource::<ColourModeState>()
        .init_resource::<PointCloudColours>()
        .init_resource::<MapLabels>()
        .init_resource::<SceneOffset>()
        .init_resource::<DetailFrame>()
        .init_resource::<JumpLinesVisibility>()
        .init_resource::<FpsReporter>()
        .insert_resource(ClearColor(Color::BLACK))
        .add_event::<SelectItemEvent>()
        .add_event::<ColourModeEvent>()
        .add_event::<LoadMapEvent>()
        .add_event::<SetJumpsVisibleEvent>()
        .add_event::<ResetCameraEvent>();

    app.add_systems(Startup, (setup, start_static_loading, start_loading).chain());

    // Loading never stops: maps can be swapped at any time.
    app.add_systems(
        Update,
        (
            finish_selectables_load,
            finish_metrics_load,
            handle_load_map_events,
            finish_map_load,
            request_overview_selection,
            handle_select_item_events,
            handle_colour_mode_events,
            handle_set_jumps_visible_events,
            handle_reset_camera_events,
        )
            .chain()
            .in_set(MapFrameSet::Selection),
    )
    .add_systems(
        Update,
        transition_to_running
            .in_set(MapFrameSet::Selection)
            .run_if(in_state(AppState::Loading)),
    );

    // Pointer input only once the first map is on screen.
    app.add_systems(
        Update,
        (select_on_click, update_hover_label)
            .in_set(MapFrameSet::Input)
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        orbit_camera_controller.in_set(MapFrameSet::Controls),
    )
    .add_systems(
        Update,
        (
            apply_jump_lines_visibility,
            sync_point_cloud_colours,
            position_labels,
            refresh_label_text,
            fps_notification_system,
        )
            .in_set(MapFrameSet::Overlay),
    );

    #[cfg(not(target_arch = "wasm32"))]
    app.add_systems(
        Update,
        (colour_mode_shortcuts, view_shortcuts)
            .in_set(MapFrameSet::Input)
            .run_if(in_state(AppState::Running)),
    );

    app
}

fn spawn_map_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, CAMERA_START_HEIGHT, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        MapCamera,
    ));
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    println!("=== STAR MAP VIEWER ===");

    spawn_map_camera(&mut commands);
    spawn_selection_halo(&mut commands, &mut meshes, &mut materials);
    spawn_labels(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
