use crate::engine::camera::orbit_controller::OrbitController;
use bevy::prelude::*;

/// Work to run once a transition lands, with full world access.
pub type TransitionCallback = Box<dyn FnOnce(&mut World) + Send + Sync>;

/// Linear interpolation for channel values.
pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, alpha: f32) -> Self;
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, alpha: f32) -> Self {
        self.lerp(to, alpha)
    }
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, alpha: f32) -> Self {
        self + (to - self) * alpha
    }
}

/// An animated value with both ends known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel<T> {
    pub origin: T,
    pub destination: T,
}

impl<T: Lerp> Channel<T> {
    pub fn at(&self, alpha: f32) -> T {
        self.origin.lerp_to(self.destination, alpha)
    }
}

/// Requested end value, with an optional explicit start. A missing start is
/// taken from the live camera state when the transition begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRequest<T> {
    pub from: Option<T>,
    pub to: T,
}

impl<T: Copy> ChannelRequest<T> {
    pub fn to(to: T) -> Self {
        Self { from: None, to }
    }

    #[cfg(test)]
    pub fn between(from: T, to: T) -> Self {
        Self {
            from: Some(from),
            to,
        }
    }

    fn resolve(self, live: T) -> Channel<T> {
        Channel {
            origin: self.from.unwrap_or(live),
            destination: self.to,
        }
    }
}

/// A camera move: which channels animate, for how long, and what runs after.
pub struct TransitionRequest {
    pub duration: f32,
    pub on_complete: Option<TransitionCallback>,
    pub target: Option<ChannelRequest<Vec3>>,
    pub position: Option<ChannelRequest<Vec3>>,
    pub azimuth: Option<ChannelRequest<f32>>,
}

impl TransitionRequest {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            on_complete: None,
            target: None,
            position: None,
            azimuth: None,
        }
    }

    pub fn with_target(mut self, to: Vec3) -> Self {
        self.target = Some(ChannelRequest::to(to));
        self
    }

    pub fn with_position(mut self, to: Vec3) -> Self {
        self.position = Some(ChannelRequest::to(to));
        self
    }

    pub fn with_azimuth(mut self, to: f32) -> Self {
        self.azimuth = Some(ChannelRequest::to(to));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce(&mut World) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// The single in-flight transition.
pub struct TransitionState {
    pub target: Option<Channel<Vec3>>,
    pub position: Option<Channel<Vec3>>,
    pub azimuth: Option<Channel<f32>>,
    pub elapsed: f32,
    pub duration: f32,
    on_complete: Option<TransitionCallback>,
}

impl TransitionState {
    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}

/// Result of advancing the engine by one frame.
pub enum TransitionTick {
    Idle,
    Running { alpha: f32 },
    /// The transition landed; the callback must be run by the caller.
    Finished(Option<TransitionCallback>),
}

/// Owns at most one camera transition. Starting a new one replaces the old
/// one mid-flight; the replaced transition's callback never runs.
#[derive(Resource, Default)]
pub struct CameraTransitions {
    active: Option<TransitionState>,
}

impl CameraTransitions {
    /// Begin `request`, taking missing origins from the live controller and
    /// camera, and lock user pan and rotate until it lands.
    pub fn start(
        &mut self,
        request: TransitionRequest,
        controller: &mut OrbitController,
        camera: &Transform,
    ) {
        if self.active.take().is_some() {
            debug!("Replacing in-flight camera transition");
        }

        self.active = Some(TransitionState {
            target: request.target.map(|c| c.resolve(controller.target)),
            position: request.position.map(|c| c.resolve(camera.translation)),
            azimuth: request
                .azimuth
                .map(|c| c.resolve(controller.live_azimuth(camera.translation))),
            elapsed: 0.0,
            duration: request.duration,
            on_complete: request.on_complete,
        });
        controller.set_interaction_enabled(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&TransitionState> {
        self.active.as_ref()
    }

    /// Advance by `delta_secs` and write the interpolated values. On landing
    /// the controller is synced, unclamped and unlocked, and the state
    /// cleared.
    pub fn advance(
        &mut self,
        delta_secs: f32,
        controller: &mut OrbitController,
        camera: &mut Transform,
    ) -> TransitionTick {
        let Some(state) = self.active.as_mut() else {
            return TransitionTick::Idle;
        };

        state.elapsed += delta_secs;
        let alpha = state.alpha();

        if let Some(position) = &state.position {
            camera.translation = position.at(alpha);
        }
        if let Some(azimuth) = &state.azimuth {
            controller.set_azimuth_clamp(azimuth.at(alpha));
        }
        if let Some(target) = &state.target {
            controller.target = target.at(alpha);
        }

        if alpha < 1.0 {
            return TransitionTick::Running { alpha };
        }

        controller.update(camera);
        controller.clear_azimuth_clamp();
        controller.set_interaction_enabled(true);

        let callback = self.active.take().and_then(|state| state.on_complete);
        TransitionTick::Finished(callback)
    }
}
