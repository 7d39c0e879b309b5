use crate::engine::assets::metrics::SystemMetrics;
use crate::engine::assets::star_map::StarMap;
use crate::engine::colour::label_text::{LabelSubject, secondary_text};
use crate::engine::colour::point_cloud_colours::PointCloudColours;
use crate::engine::colour::strategy::ColourMode;
use crate::engine::scene::labels::MapLabels;
use crate::tools::selection::{Selection, SelectionState};
use bevy::prelude::*;
use std::fmt;

#[derive(Resource, Debug, Clone, Default)]
pub struct ColourModeState {
    pub current_mode: ColourMode,
}

/// Request to switch the point-cloud colouring.
#[derive(Event, Debug, Clone, Copy)]
pub struct ColourModeEvent {
    pub mode: ColourMode,
    pub source: ColourModeSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourModeSource {
    Rpc,
    Keyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColourModeError {
    /// Metric modes need the traffic and kill datasets first.
    MetricsNotLoaded,
}

impl fmt::Display for ColourModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetricsNotLoaded => write!(f, "colour modes are unavailable until metrics load"),
        }
    }
}

impl std::error::Error for ColourModeError {}

pub fn check_colour_mode_available(metrics: &SystemMetrics) -> Result<(), ColourModeError> {
    if metrics.is_loaded() {
        Ok(())
    } else {
        Err(ColourModeError::MetricsNotLoaded)
    }
}

/// Keys 1-4 pick a colour mode on native builds. Web builds switch through RPC.
#[cfg(not(target_arch = "wasm32"))]
pub fn colour_mode_shortcuts(
    mut events: EventWriter<ColourModeEvent>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let keys = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
    for (key, mode) in keys.into_iter().zip(ColourMode::ALL) {
        if keyboard.just_pressed(key) {
            println!("Colour mode: {}", mode.as_str());
            events.write(ColourModeEvent {
                mode,
                source: ColourModeSource::Keyboard,
            });
        }
    }
}

/// Apply colour mode requests: recolour every slot (keeping any cluster
/// dimming) and refresh the selection label's secondary line.
pub fn handle_colour_mode_events(
    mut events: EventReader<ColourModeEvent>,
    mut state: ResMut<ColourModeState>,
    metrics: Res<SystemMetrics>,
    map: Res<StarMap>,
    selection: Res<SelectionState>,
    mut colours: ResMut<PointCloudColours>,
    mut labels: ResMut<MapLabels>,
) {
    for event in events.read() {
        if let Err(error) = check_colour_mode_available(&metrics) {
            warn!("Ignoring colour mode {:?}: {}", event.mode, error);
            continue;
        }
        if state.current_mode == event.mode {
            continue;
        }

        state.current_mode = event.mode;
        colours.recolour(&map, event.mode, &metrics);
        info!("Colour mode changed to {:?} via {:?}", event.mode, event.source);

        if let Selection::System(id) = selection.current() {
            if let Some(system) = map.get(id) {
                labels.selection.content.secondary =
                    secondary_text(event.mode, LabelSubject::System(system), &metrics);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::metrics::{KillsFile, TrafficFile};
    use crate::engine::assets::selectables::Selectables;
    use crate::engine::assets::system_catalog::SystemCatalogFile;
    use crate::engine::assets::system_id::SystemId;
    use crate::engine::colour::label_text::LabelContent;
    use crate::engine::scene::labels::LabelKind;

    fn app(metrics: SystemMetrics) -> App {
        let catalog: SystemCatalogFile = serde_json::from_str(
            r#"{"1": {"x": 0, "y": 0, "z": 0, "solarSystemName": "A", "security": 0.5}}"#,
        )
        .unwrap();
        let map = StarMap::from_catalog(&catalog);
        let mut colours = PointCloudColours::default();
        colours.recolour(&map, ColourMode::Security, &metrics);

        let mut app = App::new();
        app.add_event::<ColourModeEvent>()
            .init_resource::<ColourModeState>()
            .init_resource::<MapLabels>()
            .insert_resource(SelectionState::default())
            .insert_resource(Selectables::default())
            .insert_resource(metrics)
            .insert_resource(map)
            .insert_resource(colours)
            .add_systems(Update, handle_colour_mode_events);
        app
    }

    fn loaded_metrics() -> SystemMetrics {
        let traffic: TrafficFile =
            serde_json::from_str(r#"[{"system_id": 1, "ship_jumps": 12}]"#).unwrap();
        let kills: KillsFile = serde_json::from_str("[]").unwrap();
        SystemMetrics::from_files(Some(&traffic), Some(&kills))
    }

    fn request(app: &mut App, mode: ColourMode) {
        app.world_mut().send_event(ColourModeEvent {
            mode,
            source: ColourModeSource::Rpc,
        });
        app.update();
    }

    #[test]
    fn mode_requests_wait_for_metrics() {
        let mut app = app(SystemMetrics::default());
        request(&mut app, ColourMode::Traffic);

        assert_eq!(
            app.world().resource::<ColourModeState>().current_mode,
            ColourMode::Security
        );
        assert_eq!(
            check_colour_mode_available(app.world().resource::<SystemMetrics>()),
            Err(ColourModeError::MetricsNotLoaded)
        );
    }

    #[test]
    fn switching_mode_recolours_and_refreshes_selection_label() {
        let mut app = app(loaded_metrics());
        app.world_mut()
            .resource_scope(|world, mut selection: Mut<SelectionState>| {
                selection
                    .select(
                        &SystemId::from("1"),
                        world.resource::<StarMap>(),
                        world.resource::<Selectables>(),
                        ColourMode::Security,
                        world.resource::<SystemMetrics>(),
                    )
                    .unwrap();
            });
        app.world_mut().resource_mut::<MapLabels>().show(
            LabelKind::Selection,
            Vec3::ZERO,
            LabelContent {
                name: "A".into(),
                secondary: "0.5".into(),
            },
        );

        request(&mut app, ColourMode::Traffic);

        let world = app.world();
        assert_eq!(
            world.resource::<ColourModeState>().current_mode,
            ColourMode::Traffic
        );
        assert_eq!(
            world.resource::<PointCloudColours>().get(0),
            Some([1.0, 1.0, 1.0])
        );
        assert_eq!(world.resource::<MapLabels>().selection.content.secondary, "🚀12");
    }
}
