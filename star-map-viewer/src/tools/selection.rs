use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::selectables::Selectables;
use crate::engine::assets::star_map::StarMap;
use crate::engine::assets::system_id::SystemId;
use crate::engine::camera::orbit_controller::{MapCamera, OrbitController};
use crate::engine::camera::recenter::{SceneOffset, recenter_callback};
use crate::engine::camera::transition::{CameraTransitions, TransitionRequest};
use crate::engine::colour::label_text::{LabelContent, LabelSubject};
use crate::engine::colour::point_cloud_colours::PointCloudColours;
use crate::engine::colour::strategy::ColourMode;
use crate::engine::scene::labels::{LabelKind, MapLabels};
use crate::engine::systems::colour_mode::ColourModeState;
use crate::rpc::detail_frame::DetailFrame;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::picking::pick_under_cursor;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::TRANSITION_DURATION_SECS;
use std::fmt;

/// The single active selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    System(SystemId),
    Selectable(SystemId),
}

impl Selection {
    pub fn id(&self) -> Option<&SystemId> {
        match self {
            Self::None => None,
            Self::System(id) | Self::Selectable(id) => Some(id),
        }
    }

    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::System(_) => Some("system"),
            Self::Selectable(_) => Some("selectable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The id is neither a system of the loaded map nor a selectable.
    UnknownItem(SystemId),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem(id) => write!(f, "unknown selection: {}", id),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Where a selection request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Rpc,
    Pointer,
    MapLoad,
}

/// Request to select a system or selectable by id.
#[derive(Event, Debug, Clone)]
pub struct SelectItemEvent {
    pub id: SystemId,
    pub source: SelectionSource,
}

/// How the camera should move to a new selection. Anchors are in render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    /// Re-anchor on a system, keeping the current viewing offset.
    Follow { anchor: Vec3 },
    /// Look down on an aggregate from `height` above it, facing north.
    Overview { anchor: Vec3, height: f32 },
}

/// Point-cloud colouring a selection asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recolour {
    /// Full palette; only acted on when the cloud is currently dimmed.
    RestoreFull,
    /// Dim everything except these systems.
    Highlight(Vec<SystemId>),
}

/// Everything a successful selection changes outside the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome {
    pub selection: Selection,
    /// Selection label text; `None` hides the label.
    pub label: Option<LabelContent>,
    pub camera: CameraMove,
    pub recolour: Recolour,
}

impl SelectionOutcome {
    pub fn anchor(&self) -> Vec3 {
        match self.camera {
            CameraMove::Follow { anchor } | CameraMove::Overview { anchor, .. } => anchor,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SelectionState {
    current: Selection,
    anchor: Option<Vec3>,
}

impl SelectionState {
    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Render-space position of the current selection.
    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    /// Forget the selection, e.g. when its map is unloaded.
    pub fn clear(&mut self) {
        self.current = Selection::None;
        self.anchor = None;
    }

    /// Resolve `id` against the map, then the selectables. Returns `Ok(None)`
    /// when `id` is already selected.
    pub fn select(
        &mut self,
        id: &SystemId,
        map: &StarMap,
        selectables: &Selectables,
        mode: ColourMode,
        metrics: &SystemMetrics,
    ) -> Result<Option<SelectionOutcome>, SelectionError> {
        if self.current.id() == Some(id) {
            return Ok(None);
        }

        let outcome = if let Some(system) = map.get(id) {
            SelectionOutcome {
                selection: Selection::System(id.clone()),
                label: LabelContent::for_subject(mode, LabelSubject::System(system), metrics),
                camera: CameraMove::Follow {
                    anchor: system.render_position,
                },
                recolour: Recolour::RestoreFull,
            }
        } else if let Some(selectable) = selectables.get(id) {
            SelectionOutcome {
                selection: Selection::Selectable(id.clone()),
                label: LabelContent::for_subject(
                    mode,
                    LabelSubject::Selectable(selectable),
                    metrics,
                ),
                camera: CameraMove::Overview {
                    anchor: selectable.render_position(),
                    height: selectable.zoom_distance(),
                },
                recolour: match selectable.members() {
                    Some(members) => Recolour::Highlight(members.to_vec()),
                    None => Recolour::RestoreFull,
                },
            }
        } else {
            return Err(SelectionError::UnknownItem(id.clone()));
        };

        self.current = outcome.selection.clone();
        self.anchor = Some(outcome.anchor());
        Ok(Some(outcome))
    }
}

/// Transition for a camera move, with scene positions taken through the
/// current offset.
pub fn camera_transition(
    camera_move: CameraMove,
    controller: &OrbitController,
    camera: &Transform,
    scene_offset: &SceneOffset,
) -> TransitionRequest {
    match camera_move {
        CameraMove::Follow { anchor } => {
            let anchor = scene_offset.to_scene(anchor);
            TransitionRequest::new(TRANSITION_DURATION_SECS)
                .with_target(anchor)
                .with_position(camera.translation - controller.target + anchor)
                .on_complete(recenter_callback(true))
        }
        CameraMove::Overview { anchor, height } => {
            let anchor = scene_offset.to_scene(anchor);
            TransitionRequest::new(TRANSITION_DURATION_SECS)
                .with_target(anchor)
                .with_position(anchor + Vec3::Y * height)
                .with_azimuth(0.0)
                .on_complete(recenter_callback(false))
        }
    }
}

/// Left click selects the system under the pointer. Clicking empty space
/// changes nothing.
pub fn select_on_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MapCamera>>,
    map: Res<StarMap>,
    scene_offset: Res<SceneOffset>,
    mut events: EventWriter<SelectItemEvent>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(index) = pick_under_cursor(&windows, &camera_query, &map, &scene_offset) else {
        return;
    };
    if let Some(system) = map.by_index(index) {
        events.write(SelectItemEvent {
            id: system.id.clone(),
            source: SelectionSource::Pointer,
        });
    }
}

/// Apply selection requests: recolour, relabel, move the camera and point the
/// detail frame at the new item.
pub fn handle_select_item_events(
    mut events: EventReader<SelectItemEvent>,
    mut selection: ResMut<SelectionState>,
    map: Res<StarMap>,
    selectables: Res<Selectables>,
    colour_mode: Res<ColourModeState>,
    metrics: Res<SystemMetrics>,
    mut colours: ResMut<PointCloudColours>,
    mut labels: ResMut<MapLabels>,
    mut transitions: ResMut<CameraTransitions>,
    mut controller: ResMut<OrbitController>,
    scene_offset: Res<SceneOffset>,
    camera_query: Query<&Transform, With<MapCamera>>,
    mut detail_frame: ResMut<DetailFrame>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mode = colour_mode.current_mode;

    for event in events.read() {
        let outcome = match selection.select(&event.id, &map, &selectables, mode, &metrics) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => continue,
            Err(error) => {
                warn!("{} (via {:?})", error, event.source);
                continue;
            }
        };

        info!("Selected {:?} via {:?}", outcome.selection, event.source);

        match &outcome.recolour {
            Recolour::RestoreFull => {
                if colours.is_dimmed() {
                    colours.restore_full(&map, mode, &metrics);
                }
            }
            Recolour::Highlight(members) => {
                colours.highlight_members(&map, mode, &metrics, members);
            }
        }

        labels.hide(LabelKind::Hover);
        match &outcome.label {
            Some(content) => labels.show(LabelKind::Selection, outcome.anchor(), content.clone()),
            None => labels.hide(LabelKind::Selection),
        }

        if let Ok(camera) = camera_query.single() {
            let request = camera_transition(outcome.camera, &controller, camera, &scene_offset);
            transitions.start(request, &mut controller, camera);
        }

        detail_frame.show_item(&event.id, &mut rpc_interface);
        rpc_interface.send_notification(
            "selection_changed",
            serde_json::json!({
                "id": event.id,
                "kind": outcome.selection.kind(),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::metrics::PerSystemMetric;
    use crate::engine::assets::selectables::SelectableCatalogFile;
    use crate::engine::assets::system_catalog::SystemCatalogFile;
    use constants::palette::NULL_SECURITY_COLOUR;
    use constants::render_settings::DIMMED_SYSTEM_GREY;

    fn id(s: &str) -> SystemId {
        SystemId::from(s)
    }

    fn map() -> StarMap {
        let catalog: SystemCatalogFile = serde_json::from_str(
            r#"{
                "30000142": {"x": 1e18, "y": 0, "z": 0, "solarSystemName": "Jita", "security": 0.9459},
                "30000144": {"x": 0, "y": 1e18, "z": 0, "solarSystemName": "Perimeter", "security": 0.95},
                "30002187": {"x": 0, "y": 0, "z": 1e18, "solarSystemName": "Amarr", "security": -0.2}
            }"#,
        )
        .unwrap();
        StarMap::from_catalog(&catalog)
    }

    fn selectables() -> Selectables {
        let file: SelectableCatalogFile = serde_json::from_str(
            r#"{
                "20000020": {"x": 1e18, "y": 0, "z": 0, "distance": 2e17, "name": "Kimotoro",
                             "security": 0.91, "systems": [30000142, 30000144]},
                "10000002": {"x": 1e18, "y": 0, "z": 0, "distance": 8e17, "name": "The Forge"},
                "-1": {"x": 0, "y": 0, "z": 0, "distance": 3e18}
            }"#,
        )
        .unwrap();
        Selectables::from_file(&file)
    }

    #[test]
    fn system_selection_follows_the_system() {
        let mut state = SelectionState::default();
        let outcome = state
            .select(&id("30000142"), &map(), &selectables(), ColourMode::Security, &SystemMetrics::default())
            .unwrap()
            .unwrap();

        assert_eq!(outcome.selection, Selection::System(id("30000142")));
        assert_eq!(
            outcome.camera,
            CameraMove::Follow {
                anchor: Vec3::new(1.0, 0.0, 0.0)
            }
        );
        assert_eq!(outcome.recolour, Recolour::RestoreFull);
        let label = outcome.label.unwrap();
        assert_eq!(label.name, "Jita");
        assert_eq!(label.secondary, "0.9");
        assert_eq!(state.anchor(), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn selecting_the_same_id_twice_is_a_no_op() {
        let mut state = SelectionState::default();
        let (map, selectables) = (map(), selectables());
        let metrics = SystemMetrics::default();

        assert!(
            state
                .select(&id("20000020"), &map, &selectables, ColourMode::Security, &metrics)
                .unwrap()
                .is_some()
        );
        assert!(
            state
                .select(&id("20000020"), &map, &selectables, ColourMode::Security, &metrics)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn cluster_selection_highlights_members_from_above() {
        let mut state = SelectionState::default();
        let outcome = state
            .select(&id("20000020"), &map(), &selectables(), ColourMode::Traffic, &SystemMetrics::default())
            .unwrap()
            .unwrap();

        assert_eq!(
            outcome.recolour,
            Recolour::Highlight(vec![id("30000142"), id("30000144")])
        );
        assert!(matches!(
            outcome.camera,
            CameraMove::Overview { height, .. } if (height - 0.2).abs() < 1e-6
        ));
        // Selectables ignore the colour mode.
        assert_eq!(outcome.label.unwrap().secondary, "0.9");
    }

    #[test]
    fn unnamed_selectable_hides_the_label() {
        let mut state = SelectionState::default();
        let outcome = state
            .select(&id("-1"), &map(), &selectables(), ColourMode::Security, &SystemMetrics::default())
            .unwrap()
            .unwrap();
        assert!(outcome.label.is_none());
        assert_eq!(outcome.recolour, Recolour::RestoreFull);
    }

    #[test]
    fn unknown_ids_leave_the_selection_alone() {
        let mut state = SelectionState::default();
        let (map, selectables) = (map(), selectables());
        let metrics = SystemMetrics::default();
        state
            .select(&id("30000142"), &map, &selectables, ColourMode::Security, &metrics)
            .unwrap();

        let error = state
            .select(&id("404"), &map, &selectables, ColourMode::Security, &metrics)
            .unwrap_err();
        assert_eq!(error, SelectionError::UnknownItem(id("404")));
        assert_eq!(state.current(), &Selection::System(id("30000142")));
    }

    #[test]
    fn follow_keeps_the_viewing_offset() {
        let controller = OrbitController {
            target: Vec3::new(1.0, 0.0, 0.0),
            ..default()
        };
        let camera = Transform::from_xyz(1.0, 2.0, 3.0);
        let offset = SceneOffset(Vec3::new(-1.0, 0.0, 0.0));

        let request = camera_transition(
            CameraMove::Follow {
                anchor: Vec3::new(1.0, 5.0, 0.0),
            },
            &controller,
            &camera,
            &offset,
        );
        assert_eq!(request.target.unwrap().to, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(request.position.unwrap().to, Vec3::new(0.0, 7.0, 3.0));
        assert!(request.azimuth.is_none());
        assert!(request.on_complete.is_some());
    }

    fn selection_app() -> App {
        let map = map();
        let metrics = SystemMetrics {
            traffic: PerSystemMetric::from_entries([(id("30000142"), 5)]),
            ..Default::default()
        };
        let mut colours = PointCloudColours::default();
        colours.recolour(&map, ColourMode::Security, &metrics);

        let mut app = App::new();
        app.add_event::<SelectItemEvent>()
            .insert_resource(map)
            .insert_resource(selectables())
            .insert_resource(metrics)
            .insert_resource(colours)
            .init_resource::<SelectionState>()
            .init_resource::<ColourModeState>()
            .init_resource::<MapLabels>()
            .init_resource::<CameraTransitions>()
            .init_resource::<OrbitController>()
            .init_resource::<SceneOffset>()
            .init_resource::<DetailFrame>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, handle_select_item_events);
        app.world_mut()
            .spawn((MapCamera, Transform::from_xyz(0.0, 2.0, 0.0)));
        app
    }

    fn select(app: &mut App, item: &str) {
        app.world_mut().send_event(SelectItemEvent {
            id: id(item),
            source: SelectionSource::Rpc,
        });
        app.update();
    }

    #[test]
    fn cluster_then_system_restores_full_colours() {
        let mut app = selection_app();
        let amarr = app
            .world()
            .resource::<StarMap>()
            .index_of(&id("30002187"))
            .unwrap();

        select(&mut app, "20000020");
        {
            let world = app.world();
            let colours = world.resource::<PointCloudColours>();
            assert!(colours.is_dimmed());
            assert_eq!(colours.get(amarr), Some([DIMMED_SYSTEM_GREY; 3]));
            assert!(world.resource::<CameraTransitions>().is_active());
            assert!(!world.resource::<OrbitController>().interaction_enabled());
            assert_eq!(
                world.resource::<DetailFrame>().current_url(),
                Some("../map/20000020.html")
            );
        }

        select(&mut app, "30000142");
        let world = app.world();
        let colours = world.resource::<PointCloudColours>();
        assert!(!colours.is_dimmed());
        assert_eq!(colours.get(amarr), Some(NULL_SECURITY_COLOUR));
        assert_eq!(
            world.resource::<SelectionState>().current(),
            &Selection::System(id("30000142"))
        );
        let labels = world.resource::<MapLabels>();
        assert!(labels.selection.visible);
        assert!(!labels.hover.visible);
        assert_eq!(labels.selection.content.name, "Jita");
    }

    #[test]
    fn unknown_request_changes_nothing() {
        let mut app = selection_app();
        select(&mut app, "30000142");
        select(&mut app, "404");

        let world = app.world();
        assert_eq!(
            world.resource::<SelectionState>().current(),
            &Selection::System(id("30000142"))
        );
        assert_eq!(
            world.resource::<DetailFrame>().current_url(),
            Some("../map/30000142.html")
        );
    }

    fn click_app() -> App {
        let mut app = selection_app();
        let camera = Transform::from_xyz(0.0, 2.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z);
        let world = app.world_mut();
        let entity = world
            .query_filtered::<Entity, With<MapCamera>>()
            .single(world)
            .unwrap();
        world.entity_mut(entity).insert((
            camera,
            GlobalTransform::from(camera),
            Projection::Perspective(PerspectiveProjection::default()),
        ));
        world.spawn((Window::default(), PrimaryWindow));

        app.init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Update, select_on_click.before(handle_select_item_events));
        app
    }

    fn click_at(app: &mut App, cursor: Vec2) {
        let world = app.world_mut();
        world
            .query_filtered::<&mut Window, With<PrimaryWindow>>()
            .single_mut(world)
            .unwrap()
            .set_cursor_position(Some(cursor));
        let mut mouse = world.resource_mut::<ButtonInput<MouseButton>>();
        mouse.release(MouseButton::Left);
        mouse.clear();
        mouse.press(MouseButton::Left);
        app.update();
    }

    #[test]
    fn clicking_empty_space_changes_nothing() {
        let mut app = click_app();
        // Top-left corner; the ray passes wide of every system.
        click_at(&mut app, Vec2::ZERO);

        let world = app.world();
        assert_eq!(world.resource::<SelectionState>().current(), &Selection::None);
        assert!(!world.resource::<CameraTransitions>().is_active());
        assert!(world.resource::<Events<SelectItemEvent>>().is_empty());
        assert!(world.resource::<DetailFrame>().current_url().is_none());
    }

    #[test]
    fn clicking_a_system_selects_it() {
        let mut app = click_app();
        // Window centre looks straight down onto Perimeter at (0, 1, 0).
        click_at(&mut app, Vec2::new(640.0, 360.0));

        let world = app.world();
        assert_eq!(
            world.resource::<SelectionState>().current(),
            &Selection::System(id("30000144"))
        );
        assert!(world.resource::<CameraTransitions>().is_active());
    }
}
