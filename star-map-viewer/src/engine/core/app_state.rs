use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Enter `Running` once the first map is spawned and selectables resolve.
/// Metrics may still be in flight; colour modes unlock separately.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.ready_to_run() {
        println!("→ Map and selectables ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn waits_for_map_and_selectables() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );

        app.world_mut().resource_mut::<LoadingProgress>().map_spawned = true;
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Loading
        );

        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .selectables_loaded = true;
        app.update();
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Running
        );
    }
}
