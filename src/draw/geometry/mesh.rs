//! Mesh output structures for GPU upload
//!
//! The tessellator produces a [`LineMesh`]: a list of colored vertices and a
//! list of index triples. This module also provides the flattened buffer views
//! a renderer uploads, and a base64 JSON form for compact transmission.

use super::types::Point;
use base64::{engine::general_purpose, Engine as _};
use serde::{Serialize, Serializer};

/// A single output vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshVertex {
    pub position: Point,
    pub color: [f32; 4],
}

/// Vertex and triangle lists for one build pass
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineMesh {
    pub vertices: Vec<MeshVertex>,
    pub triangles: Vec<[u32; 3]>,
}

impl LineMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    /// Push a vertex and return its index
    pub fn add_vertex(&mut self, position: Point, color: [f32; 4]) -> u32 {
        self.vertices.push(MeshVertex { position, color });
        (self.vertices.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    /// Interleaved positions (x,y,x,y,...)
    pub fn position_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * 2);
        for v in &self.vertices {
            data.push(v.position.x);
            data.push(v.position.y);
        }
        data
    }

    /// Interleaved colors (r,g,b,a,...)
    pub fn color_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.color).collect()
    }

    /// Flat index buffer (three entries per triangle)
    pub fn index_data(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Largest index referenced by any triangle
    pub fn max_index(&self) -> Option<u32> {
        self.index_data().into_iter().max()
    }

    /// Every triangle index refers to an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len() as u32;
        self.triangles.iter().flatten().all(|&idx| idx < count)
    }

    /// Axis-aligned bounds of all vertex positions: [min_x, min_y, max_x, max_y]
    pub fn bounds(&self) -> Option<[f32; 4]> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;

        for v in &self.vertices {
            min_x = min_x.min(v.position.x);
            min_y = min_y.min(v.position.y);
            max_x = max_x.max(v.position.x);
            max_y = max_y.max(v.position.y);
        }
        Some([min_x, min_y, max_x, max_y])
    }

    /// Signed area of a triangle (positive = counter-clockwise in y-up space)
    pub fn signed_area(&self, triangle: usize) -> Option<f32> {
        let [a, b, c] = *self.triangles.get(triangle)?;
        let p0 = self.vertices.get(a as usize)?.position;
        let p1 = self.vertices.get(b as usize)?.position;
        let p2 = self.vertices.get(c as usize)?.position;
        Some(0.5 * ((p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)))
    }
}

/// Serialize Vec<f32> as base64-encoded little-endian bytes
pub fn serialize_f32_vec_base64<S>(data: &[f32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for f in data {
        bytes.extend_from_slice(&f.to_le_bytes());
    }
    serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
}

/// Serialize Vec<u32> as base64-encoded little-endian bytes
pub fn serialize_u32_vec_base64<S>(data: &[u32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut bytes = Vec::with_capacity(data.len() * 4);
    for idx in data {
        bytes.extend_from_slice(&idx.to_le_bytes());
    }
    serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
}

/// Compact JSON form of a mesh with base64 buffers
#[derive(Debug, Clone, Serialize)]
pub struct MeshJSON {
    pub vertex_count: usize,
    pub triangle_count: usize,
    #[serde(serialize_with = "serialize_f32_vec_base64")]
    pub position_data: Vec<f32>,
    #[serde(serialize_with = "serialize_f32_vec_base64")]
    pub color_data: Vec<f32>,
    #[serde(serialize_with = "serialize_u32_vec_base64")]
    pub index_data: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f32; 4]>,
}

impl MeshJSON {
    pub fn from_mesh(mesh: &LineMesh) -> Self {
        MeshJSON {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            position_data: mesh.position_data(),
            color_data: mesh.color_data(),
            index_data: mesh.index_data(),
            bounds: mesh.bounds(),
        }
    }
}
