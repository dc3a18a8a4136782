//! Binary serialization for mesh data
//!
//! Compact little-endian encoding of a [`LineMesh`], used for transferring a
//! rebuilt mesh to a renderer process without a JSON float round-trip.

use super::mesh::{LineMesh, MeshVertex};
use super::types::Point;
use anyhow::{bail, Context};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

/// Magic header for binary meshes
pub const MESH_MAGIC: &[u8; 8] = b"UILINEMB";

const HEADER_SIZE: usize = 16;
const VERTEX_SIZE: usize = 24;
const TRIANGLE_SIZE: usize = 12;

/// Serialize a mesh to the binary format
/// Format: [magic: 8 bytes][vertex_count: u32][triangle_count: u32][vertices][triangles]
/// Each vertex: x, y, r, g, b, a as f32
/// Each triangle: 3 x u32
/// Everything after the magic is 4-byte aligned for Float32Array/Uint32Array views
pub fn serialize_mesh_binary(mesh: &LineMesh) -> anyhow::Result<Vec<u8>> {
    let vertex_count = u32::try_from(mesh.vertex_count()).context("Too many vertices for binary mesh")?;
    let triangle_count = u32::try_from(mesh.triangle_count()).context("Too many triangles for binary mesh")?;

    let mut buffer = Vec::with_capacity(
        HEADER_SIZE + mesh.vertex_count() * VERTEX_SIZE + mesh.triangle_count() * TRIANGLE_SIZE,
    );
    buffer.extend_from_slice(MESH_MAGIC);
    buffer.write_u32::<LittleEndian>(vertex_count)?;
    buffer.write_u32::<LittleEndian>(triangle_count)?;

    for v in &mesh.vertices {
        buffer.write_f32::<LittleEndian>(v.position.x)?;
        buffer.write_f32::<LittleEndian>(v.position.y)?;
        for &c in &v.color {
            buffer.write_f32::<LittleEndian>(c)?;
        }
    }

    for tri in &mesh.triangles {
        for &idx in tri {
            buffer.write_u32::<LittleEndian>(idx)?;
        }
    }
    Ok(buffer)
}

/// Parse a mesh from the binary format
pub fn deserialize_mesh_binary(bytes: &[u8]) -> anyhow::Result<LineMesh> {
    if bytes.len() < MESH_MAGIC.len() || &bytes[..MESH_MAGIC.len()] != MESH_MAGIC {
        bail!("Not a binary line mesh: missing UILINEMB header");
    }

    let mut cursor = Cursor::new(&bytes[MESH_MAGIC.len()..]);
    let vertex_count = cursor.read_u32::<LittleEndian>().context("Truncated mesh header")? as usize;
    let triangle_count = cursor.read_u32::<LittleEndian>().context("Truncated mesh header")? as usize;

    let payload = bytes.len() - HEADER_SIZE;
    let expected = vertex_count
        .checked_mul(VERTEX_SIZE)
        .zip(triangle_count.checked_mul(TRIANGLE_SIZE))
        .and_then(|(v, t)| v.checked_add(t));
    if expected != Some(payload) {
        bail!(
            "Binary mesh size mismatch: header claims {} vertices and {} triangles, payload is {} bytes",
            vertex_count,
            triangle_count,
            payload
        );
    }

    let mut mesh = LineMesh {
        vertices: Vec::with_capacity(vertex_count),
        triangles: Vec::with_capacity(triangle_count),
    };

    for i in 0..vertex_count {
        let x = cursor.read_f32::<LittleEndian>().with_context(|| format!("Truncated vertex {}", i))?;
        let y = cursor.read_f32::<LittleEndian>().with_context(|| format!("Truncated vertex {}", i))?;
        let mut color = [0.0f32; 4];
        for c in color.iter_mut() {
            *c = cursor.read_f32::<LittleEndian>().with_context(|| format!("Truncated vertex {}", i))?;
        }
        mesh.vertices.push(MeshVertex { position: Point::new(x, y), color });
    }

    for i in 0..triangle_count {
        let mut tri = [0u32; 3];
        for idx in tri.iter_mut() {
            *idx = cursor.read_u32::<LittleEndian>().with_context(|| format!("Truncated triangle {}", i))?;
        }
        mesh.triangles.push(tri);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_layout() {
        let mut mesh = LineMesh::new();
        mesh.add_vertex(Point::new(1.0, 2.0), [0.5, 0.5, 0.5, 1.0]);
        mesh.add_vertex(Point::new(3.0, 4.0), [0.5, 0.5, 0.5, 1.0]);
        mesh.add_vertex(Point::new(5.0, 6.0), [0.5, 0.5, 0.5, 1.0]);
        mesh.add_triangle(0, 1, 2);

        let bytes = serialize_mesh_binary(&mesh).unwrap();
        assert_eq!(&bytes[..8], b"UILINEMB");
        assert_eq!(bytes.len(), 8 + 8 + 3 * 24 + 12);
        assert_eq!(u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]), 3);

        let decoded = deserialize_mesh_binary(&bytes).unwrap();
        assert_eq!(decoded, mesh);
    }

    #[test]
    fn test_rejects_bad_header_and_truncation() {
        assert!(deserialize_mesh_binary(b"NOTAMESH\0\0\0\0").is_err());

        let mut mesh = LineMesh::new();
        mesh.add_vertex(Point::new(1.0, 2.0), [1.0; 4]);
        let bytes = serialize_mesh_binary(&mesh).unwrap();
        assert!(deserialize_mesh_binary(&bytes[..bytes.len() - 4]).is_err());
    }

    #[test]
    fn test_rejects_counts_larger_than_payload() {
        let mut bytes = MESH_MAGIC.to_vec();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        let err = deserialize_mesh_binary(&bytes).unwrap_err();
        assert!(err.to_string().contains("size mismatch"));

        let mut bytes = MESH_MAGIC.to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 12]);
        assert!(deserialize_mesh_binary(&bytes).is_err());
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = serialize_mesh_binary(&LineMesh::new()).unwrap();
        assert_eq!(bytes.len(), 16);
        assert!(deserialize_mesh_binary(&bytes).unwrap().is_empty());

        bytes.push(0);
        assert!(deserialize_mesh_binary(&bytes).is_err());
    }
}
