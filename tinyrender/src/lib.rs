//! Wireframe rendering on top of `lib_tga`: vectors, meshes loaded from OBJ
//! files and line rasterization.

pub mod geometry;
pub mod line;
pub mod model;
pub mod render;
