use crate::constants::render_settings::FPS_NOTIFICATION_INTERVAL_SECS;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use std::time::Duration;

/// Smoothed frame rate, once the frame-time diagnostic has samples.
pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f64> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
}

/// Paces `fps_update` notifications to the host page.
#[derive(Resource)]
pub struct FpsReporter {
    timer: Timer,
}

impl Default for FpsReporter {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(FPS_NOTIFICATION_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

impl FpsReporter {
    /// Advance by one frame; true when a report is due.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta).just_finished()
    }
}

pub fn fps_notification_system(
    time: Res<Time>,
    diagnostics: Res<DiagnosticsStore>,
    mut reporter: ResMut<FpsReporter>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !reporter.tick(time.delta()) {
        return;
    }
    if let Some(fps) = smoothed_fps(&diagnostics) {
        rpc_interface.send_notification("fps_update", serde_json::json!({ "fps": fps as f32 }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_interval() {
        let mut reporter = FpsReporter::default();
        let frame = Duration::from_millis(200);

        let due: Vec<bool> = (0..5).map(|_| reporter.tick(frame)).collect();
        assert_eq!(due, [false, false, true, false, true]);
    }

    #[test]
    fn nothing_is_sent_without_samples() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<DiagnosticsStore>()
            .init_resource::<FpsReporter>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, fps_notification_system);

        for _ in 0..3 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_millis(300));
            app.update();
        }

        assert!(smoothed_fps(app.world().resource::<DiagnosticsStore>()).is_none());
        assert!(
            app.world()
                .resource::<WebRpcInterface>()
                .pending_notifications()
                .is_empty()
        );
    }
}
