use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::star_map::StarMap;
use crate::engine::camera::orbit_controller::MapCamera;
use crate::engine::camera::recenter::SceneOffset;
use crate::engine::colour::label_text::{LabelContent, LabelSubject};
use crate::engine::colour::strategy::ColourMode;
use crate::engine::scene::labels::{LabelKind, MapLabels};
use crate::engine::systems::colour_mode::ColourModeState;
use crate::tools::picking::pick_under_cursor;
use crate::tools::selection::SelectionState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Hover label for the system at `index`, or `None` when nothing should be
/// shown: a miss, or the system that is already selected.
pub fn hover_target(
    index: Option<usize>,
    map: &StarMap,
    selection: &SelectionState,
    mode: ColourMode,
    metrics: &SystemMetrics,
) -> Option<(Vec3, LabelContent)> {
    let system = map.by_index(index?)?;
    if selection.current().id() == Some(&system.id) {
        return None;
    }
    let content = LabelContent::for_subject(mode, LabelSubject::System(system), metrics)?;
    Some((system.render_position, content))
}

/// Pick on every pointer move and show or hide the hover label.
pub fn update_hover_label(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MapCamera>>,
    map: Res<StarMap>,
    scene_offset: Res<SceneOffset>,
    selection: Res<SelectionState>,
    colour_mode: Res<ColourModeState>,
    metrics: Res<SystemMetrics>,
    mut labels: ResMut<MapLabels>,
) {
    if cursor_moved.read().last().is_none() {
        return;
    }

    let picked = pick_under_cursor(&windows, &camera_query, &map, &scene_offset);
    match hover_target(picked, &map, &selection, colour_mode.current_mode, &metrics) {
        Some((anchor, content)) => {
            let hover = &labels.hover;
            if !hover.visible || hover.anchor != anchor || hover.content != content {
                labels.show(LabelKind::Hover, anchor, content);
            }
        }
        None => {
            if labels.hover.visible {
                labels.hide(LabelKind::Hover);
            }
        }
    }
}
