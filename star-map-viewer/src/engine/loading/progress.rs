use bevy::prelude::*;

#[derive(Resource, Default, Debug, Clone)]
pub struct LoadingProgress {
    pub selectables_loaded: bool,
    pub map_spawned: bool,
}

impl LoadingProgress {
    /// The first map is on screen and selections can resolve.
    pub fn ready_to_run(&self) -> bool {
        self.selectables_loaded && self.map_spawned
    }
}
