pub mod camera;
pub mod context;
pub mod loader;
pub mod mesh;
