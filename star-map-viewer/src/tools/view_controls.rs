use crate::engine::camera::orbit_controller::{MapCamera, OrbitController};
use crate::engine::camera::recenter::SceneOffset;
use crate::engine::camera::transition::{CameraTransitions, TransitionRequest};
use crate::engine::mesh::jump_lines_mesh::JumpLines;
use crate::tools::selection::SelectionState;
use bevy::prelude::*;
use constants::render_settings::TRANSITION_DURATION_SECS;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::map_loader::LoadMapEvent;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::map_variant::MapVariant;

/// Whether stargate lines are drawn. Survives map reloads.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLinesVisibility(pub bool);

impl Default for JumpLinesVisibility {
    fn default() -> Self {
        Self(true)
    }
}

impl JumpLinesVisibility {
    pub fn visibility(&self) -> Visibility {
        if self.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SetJumpsVisibleEvent {
    pub visible: bool,
}

/// Look straight down on the selection (or the origin) from the current
/// distance.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetCameraEvent;

pub fn handle_set_jumps_visible_events(
    mut events: EventReader<SetJumpsVisibleEvent>,
    mut jumps_visible: ResMut<JumpLinesVisibility>,
) {
    for event in events.read() {
        jumps_visible.set_if_neq(JumpLinesVisibility(event.visible));
    }
}

/// Apply the toggle to existing lines and to lines spawned by a map load.
pub fn apply_jump_lines_visibility(
    jumps_visible: Res<JumpLinesVisibility>,
    mut lines: Query<(&mut Visibility, Ref<JumpLines>)>,
) {
    for (mut visibility, marker) in &mut lines {
        if jumps_visible.is_changed() || marker.is_added() {
            visibility.set_if_neq(jumps_visible.visibility());
        }
    }
}

/// Transition for a camera reset: target the anchor, sit directly above it at
/// the current distance, face north.
pub fn reset_transition(
    anchor: Vec3,
    controller: &OrbitController,
    camera: &Transform,
) -> TransitionRequest {
    let distance = camera.translation.distance(controller.target);
    TransitionRequest::new(TRANSITION_DURATION_SECS)
        .with_target(anchor)
        .with_position(anchor + Vec3::Y * distance)
        .with_azimuth(0.0)
}

pub fn handle_reset_camera_events(
    mut events: EventReader<ResetCameraEvent>,
    selection: Res<SelectionState>,
    scene_offset: Res<SceneOffset>,
    mut transitions: ResMut<CameraTransitions>,
    mut controller: ResMut<OrbitController>,
    camera_query: Query<&Transform, With<MapCamera>>,
) {
    if events.read().last().is_none() {
        return;
    }
    let Ok(camera) = camera_query.single() else {
        return;
    };

    let anchor = selection
        .anchor()
        .map(|anchor| scene_offset.to_scene(anchor))
        .unwrap_or(Vec3::ZERO);
    let request = reset_transition(anchor, &controller, camera);
    transitions.start(request, &mut controller, camera);
    info!("Camera reset towards {:?}", anchor);
}

/// Native-only view shortcuts: J toggles jump lines, R resets the camera,
/// F1-F3 load the map variants.
#[cfg(not(target_arch = "wasm32"))]
pub fn view_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    jumps_visible: Res<JumpLinesVisibility>,
    mut jump_events: EventWriter<SetJumpsVisibleEvent>,
    mut reset_events: EventWriter<ResetCameraEvent>,
    mut load_events: EventWriter<LoadMapEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyJ) {
        println!("Jump lines: {}", if jumps_visible.0 { "off" } else { "on" });
        jump_events.write(SetJumpsVisibleEvent {
            visible: !jumps_visible.0,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        reset_events.write(ResetCameraEvent);
    }

    let maps = [
        (KeyCode::F1, MapVariant::Nec),
        (KeyCode::F2, MapVariant::Pochven),
        (KeyCode::F3, MapVariant::Anoikis),
    ];
    for (key, variant) in maps {
        if keyboard.just_pressed(key) {
            println!("Loading map: {}", variant.as_str());
            load_events.write(LoadMapEvent { variant });
        }
    }
}
