//! Line drawing: geometry model, tessellation and the host-side renderer

pub mod geometry;
pub mod renderer;
pub mod tessellation;
