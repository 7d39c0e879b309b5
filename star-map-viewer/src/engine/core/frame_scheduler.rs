use crate::engine::camera::orbit_controller::{MapCamera, OrbitController};
use crate::engine::camera::transition::{CameraTransitions, TransitionTick};
use bevy::prelude::*;

/// Per-frame ordering of the map's `Update` work. Rendering follows in Bevy's
/// own schedules.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapFrameSet {
    /// RPC intake, pointer and keyboard input.
    Input,
    /// Selection, colour mode and load requests.
    Selection,
    /// Camera transition advance and completion callbacks.
    Transition,
    /// Orbit controller input and constraint.
    Controls,
    /// Screen-space overlays and GPU buffer sync.
    Overlay,
}

pub struct FrameSchedulerPlugin;

impl Plugin for FrameSchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraTransitions>()
            .init_resource::<OrbitController>()
            .configure_sets(
                Update,
                (
                    MapFrameSet::Input,
                    MapFrameSet::Selection,
                    MapFrameSet::Transition,
                    MapFrameSet::Controls,
                    MapFrameSet::Overlay,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                advance_camera_transition.in_set(MapFrameSet::Transition),
            );
    }
}

/// Step the active camera transition by the frame delta. A landed transition's
/// completion callback runs here, after the transition state is cleared.
pub fn advance_camera_transition(world: &mut World) {
    let delta_secs = world.resource::<Time>().delta_secs();

    let tick = world.resource_scope(|world, mut transitions: Mut<CameraTransitions>| {
        if !transitions.is_active() {
            return TransitionTick::Idle;
        }
        world.resource_scope(|world, mut controller: Mut<OrbitController>| {
            let mut camera_query = world.query_filtered::<&mut Transform, With<MapCamera>>();
            match camera_query.single_mut(world) {
                Ok(mut camera) => transitions.advance(delta_secs, &mut controller, &mut camera),
                Err(_) => TransitionTick::Idle,
            }
        })
    });

    if let TransitionTick::Finished(Some(callback)) = tick {
        callback(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::transition::TransitionRequest;
    use std::time::Duration;

    #[derive(Resource, Default)]
    struct Landed(u32);

    fn scheduler_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<Landed>()
            .add_plugins(FrameSchedulerPlugin);
        app.world_mut()
            .spawn((MapCamera, Transform::from_xyz(0.0, 2.0, 0.0)));
        app
    }

    fn step(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn start(app: &mut App, request: TransitionRequest) {
        let world = app.world_mut();
        let camera = *world
            .query_filtered::<&Transform, With<MapCamera>>()
            .single(world)
            .unwrap();
        world.resource_scope(|world, mut transitions: Mut<CameraTransitions>| {
            let mut controller = world.resource_mut::<OrbitController>();
            transitions.start(request, &mut controller, &camera);
        });
    }

    #[test]
    fn transition_lands_and_fires_once() {
        let mut app = scheduler_app();
        start(
            &mut app,
            TransitionRequest::new(0.25)
                .with_target(Vec3::new(1.0, 0.0, 0.0))
                .on_complete(|world: &mut World| {
                    world.resource_mut::<Landed>().0 += 1;
                }),
        );

        step(&mut app, 0.1);
        assert!(app.world().resource::<CameraTransitions>().is_active());
        assert_eq!(app.world().resource::<Landed>().0, 0);

        step(&mut app, 0.2);
        step(&mut app, 0.2);
        let world = app.world();
        assert!(!world.resource::<CameraTransitions>().is_active());
        assert_eq!(world.resource::<Landed>().0, 1);
        assert_eq!(world.resource::<OrbitController>().target, Vec3::new(1.0, 0.0, 0.0));
        assert!(world.resource::<OrbitController>().interaction_enabled());
    }

    #[test]
    fn idle_frames_leave_the_camera_alone() {
        let mut app = scheduler_app();
        step(&mut app, 0.5);
        let world = app.world_mut();
        let camera = world
            .query_filtered::<&Transform, With<MapCamera>>()
            .single(world)
            .unwrap();
        assert_eq!(camera.translation, Vec3::new(0.0, 2.0, 0.0));
    }
}
