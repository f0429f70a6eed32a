//! A minimal software rasterizer: vertex transform, perspective divide,
//! barycentric scan conversion with alpha blending, and PPM/PNG output.

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
