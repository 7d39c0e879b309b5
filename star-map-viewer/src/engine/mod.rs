pub mod assets;
pub mod camera;
pub mod colour;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod scene;
pub mod systems;
