use crate::constants::render_settings::{
    HOVER_LABEL_COLOUR, LABEL_NAME_FONT_SIZE, LABEL_OFFSET_PX, LABEL_SECONDARY_FONT_SIZE,
    SELECTION_LABEL_COLOUR,
};
use crate::engine::camera::orbit_controller::MapCamera;
use crate::engine::camera::recenter::SceneOffset;
use crate::engine::colour::label_text::LabelContent;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Follows the pointer; transient.
    Hover,
    /// Marks the current selection.
    Selection,
}

/// One label: where it points (render space) and what it says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelState {
    pub anchor: Vec3,
    pub content: LabelContent,
    pub visible: bool,
}

/// Both map labels. The overlay pass mirrors this into UI nodes.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapLabels {
    pub hover: LabelState,
    pub selection: LabelState,
}

impl MapLabels {
    pub fn get(&self, kind: LabelKind) -> &LabelState {
        match kind {
            LabelKind::Hover => &self.hover,
            LabelKind::Selection => &self.selection,
        }
    }

    pub fn get_mut(&mut self, kind: LabelKind) -> &mut LabelState {
        match kind {
            LabelKind::Hover => &mut self.hover,
            LabelKind::Selection => &mut self.selection,
        }
    }

    pub fn show(&mut self, kind: LabelKind, anchor: Vec3, content: LabelContent) {
        *self.get_mut(kind) = LabelState {
            anchor,
            content,
            visible: true,
        };
    }

    pub fn hide(&mut self, kind: LabelKind) {
        self.get_mut(kind).visible = false;
    }
}

#[derive(Component)]
pub struct LabelRoot(pub LabelKind);

#[derive(Component)]
pub struct LabelName(pub LabelKind);

#[derive(Component)]
pub struct LabelSecondary(pub LabelKind);

pub fn spawn_labels(commands: &mut Commands) {
    spawn_label(commands, LabelKind::Hover, HOVER_LABEL_COLOUR);
    spawn_label(commands, LabelKind::Selection, SELECTION_LABEL_COLOUR);
}

fn spawn_label(commands: &mut Commands, kind: LabelKind, colour: Color) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Visibility::Hidden,
            LabelRoot(kind),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: LABEL_NAME_FONT_SIZE,
                    ..default()
                },
                TextColor(colour),
                LabelName(kind),
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: LABEL_SECONDARY_FONT_SIZE,
                    ..default()
                },
                TextColor(colour),
                LabelSecondary(kind),
            ));
        });
}

/// Project label anchors to the screen. Hidden labels and anchors behind the
/// camera hide the UI node.
pub fn position_labels(
    labels: Res<MapLabels>,
    scene_offset: Res<SceneOffset>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut roots: Query<(&LabelRoot, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for (root, mut node, mut visibility) in &mut roots {
        let label = labels.get(root.0);
        let projected = label
            .visible
            .then(|| {
                camera
                    .world_to_viewport(camera_transform, scene_offset.to_scene(label.anchor))
                    .ok()
            })
            .flatten();

        match projected {
            Some(point) => {
                node.left = Val::Px(point.x + LABEL_OFFSET_PX.x);
                node.top = Val::Px(point.y + LABEL_OFFSET_PX.y);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

/// Copy label text into the UI when the labels changed.
pub fn refresh_label_text(
    labels: Res<MapLabels>,
    mut names: Query<(&LabelName, &mut Text), Without<LabelSecondary>>,
    mut secondaries: Query<(&LabelSecondary, &mut Text), Without<LabelName>>,
) {
    if !labels.is_changed() {
        return;
    }

    for (name, mut text) in &mut names {
        let content = &labels.get(name.0).content;
        if text.0 != content.name {
            text.0 = content.name.clone();
        }
    }
    for (secondary, mut text) in &mut secondaries {
        let content = &labels.get(secondary.0).content;
        if text.0 != content.secondary {
            text.0 = content.secondary.clone();
        }
    }
}
