//! Geometry module for the line renderer
//!
//! This module provides the input model (points, segments, line sets) and the
//! mesh output types, plus their serialized forms.
//!
//! # Submodules
//! - `types` - Core primitives (Point, LineSegment, LineSet)
//! - `mesh` - Mesh output and base64 JSON form for GPU upload
//! - `binary` - Binary serialization for zero-copy transfer

mod types;
mod mesh;
mod binary;

pub use types::{
    WHITE,
    Point,
    LineSegment,
    LineSet,
};

pub use mesh::{
    serialize_f32_vec_base64,
    serialize_u32_vec_base64,
    MeshVertex,
    LineMesh,
    MeshJSON,
};

pub use binary::{
    MESH_MAGIC,
    serialize_mesh_binary,
    deserialize_mesh_binary,
};
