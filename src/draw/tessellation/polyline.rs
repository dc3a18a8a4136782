//! Polyline ribbon tessellation
//!
//! Converts line segments into a beveled ribbon mesh. Every edge of a polyline
//! becomes a quad (two triangles) built from four offset corners plus an
//! anchor vertex at the edge's end point. Consecutive edges are joined with
//! two flat bevel triangles through that anchor. Closed segments get one more
//! edge back to the first point and two seal triangles.

use crate::draw::geometry::{LineMesh, LineSegment, LineSet, Point};
use super::params::{DegenerateSegments, LineParams};
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

/// Vertices emitted per polyline edge: 4 ribbon corners and 1 anchor
pub const VERTS_PER_EDGE: usize = 5;

/// Where a segment's geometry landed inside a batched mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentRange {
    pub segment_index: usize,
    pub first_vertex: u32,
    pub vertex_count: u32,
    pub first_triangle: u32,
    pub triangle_count: u32,
}

/// Number of (vertices, triangles) a segment with `point_count` points produces
pub fn segment_mesh_size(point_count: usize, closed: bool) -> (usize, usize) {
    if point_count < 2 {
        return (0, 0);
    }

    let edges = point_count - 1;
    let mut verts = edges * VERTS_PER_EDGE;
    let mut tris = edges * 2 + (edges - 1) * 2;

    if closed && point_count > 2 {
        verts += VERTS_PER_EDGE;
        // quad + bevel + seal
        tris += 6;
    }
    (verts, tris)
}

/// Angle in radians that points `from` towards `target`
fn angle_towards(from: Point, target: Point) -> f32 {
    (target.y - from.y).atan2(target.x - from.x)
}

/// Rotate the horizontal offset (dx, 0) by `angle` and add it to `center`
fn rotated_offset(center: Point, angle: f32, dx: f32) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(center.x + dx * cos, center.y + dx * sin)
}

/// Emit the five vertices for the edge `start -> end`, returns the first index
fn add_line_edge(mesh: &mut LineMesh, start: Point, end: Point, params: &LineParams) -> u32 {
    let half = params.thickness / 2.0;
    let offset = params.origin_offset();
    let color = params.color;
    let shift = |p: Point| Point::new(p.x - offset.x, p.y - offset.y);

    let start_angle = angle_towards(start, end) + FRAC_PI_2;
    let first = mesh.add_vertex(shift(rotated_offset(start, start_angle, -half)), color);
    mesh.add_vertex(shift(rotated_offset(start, start_angle, half)), color);

    let end_angle = angle_towards(end, start) - FRAC_PI_2;
    mesh.add_vertex(shift(rotated_offset(end, end_angle, -half)), color);
    mesh.add_vertex(shift(rotated_offset(end, end_angle, half)), color);

    // Anchor for the bevel into the next edge
    mesh.add_vertex(shift(end), color);

    first
}

/// Quad for the edge at `index`, plus the bevel back to the previous edge
fn add_edge_triangles(mesh: &mut LineMesh, index: u32, bevel: bool) {
    mesh.add_triangle(index, index + 1, index + 3);
    mesh.add_triangle(index + 3, index + 2, index);

    if bevel {
        // index - 1 is the previous anchor, index - 3 / index - 2 its end corners
        mesh.add_triangle(index, index - 1, index - 3);
        mesh.add_triangle(index + 1, index - 1, index - 2);
    }
}

/// Tessellate a single segment into `mesh`, appending after any existing geometry
///
/// Returns false (and adds nothing) when the segment has fewer than two points.
pub fn tessellate_segment(mesh: &mut LineMesh, segment: &LineSegment, params: &LineParams) -> bool {
    let points = segment.points();
    if points.len() < 2 {
        return false;
    }

    let (extra_verts, extra_tris) = segment_mesh_size(points.len(), segment.is_closed());
    mesh.vertices.reserve(extra_verts);
    mesh.triangles.reserve(extra_tris);

    let segment_base = mesh.vertex_count() as u32;

    for (i, pair) in points.windows(2).enumerate() {
        let index = add_line_edge(mesh, pair[0], pair[1], params);
        add_edge_triangles(mesh, index, i != 0);
    }

    if segment.renders_closed() {
        let last = points[points.len() - 1];
        let index = add_line_edge(mesh, last, points[0], params);
        add_edge_triangles(mesh, index, true);

        // Seal the loop against the first edge's start corners
        let last_vert = mesh.vertex_count() as u32 - 1;
        mesh.add_triangle(segment_base, last_vert, last_vert - 2);
        mesh.add_triangle(segment_base + 1, last_vert, last_vert - 1);
    }

    true
}

/// Tessellate segments into one mesh and report where each segment landed
pub fn tessellate_segments_with_ranges(
    segments: &[LineSegment],
    params: &LineParams,
) -> anyhow::Result<(LineMesh, Vec<SegmentRange>)> {
    params.validate()?;

    let mut mesh = LineMesh::new();
    let mut ranges = Vec::with_capacity(segments.len());

    for (segment_index, segment) in segments.iter().enumerate() {
        let first_vertex = mesh.vertex_count() as u32;
        let first_triangle = mesh.triangle_count() as u32;

        if !tessellate_segment(&mut mesh, segment, params) {
            match params.degenerate {
                DegenerateSegments::Skip => {
                    log::debug!(
                        "Skipping segment {} with {} point(s)",
                        segment_index,
                        segment.len()
                    );
                    continue;
                }
                DegenerateSegments::AbortBuild => {
                    log::debug!(
                        "Segment {} has {} point(s), aborting mesh build",
                        segment_index,
                        segment.len()
                    );
                    return Ok((LineMesh::new(), Vec::new()));
                }
            }
        }

        ranges.push(SegmentRange {
            segment_index,
            first_vertex,
            vertex_count: mesh.vertex_count() as u32 - first_vertex,
            first_triangle,
            triangle_count: mesh.triangle_count() as u32 - first_triangle,
        });
    }

    Ok((mesh, ranges))
}

/// Tessellate segments into a single mesh
pub fn tessellate_segments(segments: &[LineSegment], params: &LineParams) -> anyhow::Result<LineMesh> {
    tessellate_segments_with_ranges(segments, params).map(|(mesh, _)| mesh)
}

/// Tessellate a whole line set into a single mesh
pub fn tessellate_line_set(lines: &LineSet, params: &LineParams) -> anyhow::Result<LineMesh> {
    tessellate_segments(lines.segments(), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_params(thickness: f32) -> LineParams {
        LineParams::default()
            .with_thickness(thickness)
            .with_center_offset(false)
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_single_edge_corners() {
        let segment = LineSegment::from_points([(0.0, 0.0), (10.0, 0.0)], false);
        let mut mesh = LineMesh::new();
        assert!(tessellate_segment(&mut mesh, &segment, &raw_params(2.0)));

        let p: Vec<Point> = mesh.vertices.iter().map(|v| v.position).collect();
        assert_eq!(p.len(), 5);
        assert!(close(p[0], Point::new(0.0, -1.0)));
        assert!(close(p[1], Point::new(0.0, 1.0)));
        assert!(close(p[2], Point::new(10.0, -1.0)));
        assert!(close(p[3], Point::new(10.0, 1.0)));
        assert!(close(p[4], Point::new(10.0, 0.0)));
        assert_eq!(mesh.triangles, vec![[0, 1, 3], [3, 2, 0]]);
    }

    #[test]
    fn test_vertical_edge_offsets_along_x() {
        let segment = LineSegment::from_points([(0.0, 0.0), (0.0, 4.0)], false);
        let mut mesh = LineMesh::new();
        tessellate_segment(&mut mesh, &segment, &raw_params(1.0));

        let p: Vec<Point> = mesh.vertices.iter().map(|v| v.position).collect();
        assert!(close(p[0], Point::new(0.5, 0.0)));
        assert!(close(p[1], Point::new(-0.5, 0.0)));
        assert!(close(p[2], Point::new(0.5, 4.0)));
        assert!(close(p[3], Point::new(-0.5, 4.0)));
    }

    #[test]
    fn test_bevel_triangles_reference_previous_edge() {
        let segment = LineSegment::from_points([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false);
        let mut mesh = LineMesh::new();
        tessellate_segment(&mut mesh, &segment, &raw_params(1.0));

        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(
            mesh.triangles,
            vec![[0, 1, 3], [3, 2, 0], [5, 6, 8], [8, 7, 5], [5, 4, 2], [6, 4, 3]]
        );
    }

    #[test]
    fn test_closed_seal_uses_segment_base() {
        let first = LineSegment::from_points([(0.0, 0.0), (1.0, 0.0)], false);
        let triangle = LineSegment::from_points([(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)], true);

        let mesh = tessellate_segments(&[first, triangle], &raw_params(1.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 5 + 15);

        let seal = &mesh.triangles[mesh.triangle_count() - 2..];
        assert_eq!(seal, &[[5, 19, 17], [6, 19, 18]]);
    }

    #[test]
    fn test_segment_mesh_size() {
        assert_eq!(segment_mesh_size(0, false), (0, 0));
        assert_eq!(segment_mesh_size(1, true), (0, 0));
        assert_eq!(segment_mesh_size(2, false), (5, 2));
        assert_eq!(segment_mesh_size(2, true), (5, 2));
        assert_eq!(segment_mesh_size(3, false), (10, 6));
        assert_eq!(segment_mesh_size(3, true), (15, 12));
    }

    #[test]
    fn test_ranges_skip_degenerate_segments() {
        let segments = vec![
            LineSegment::from_points([(0.0, 0.0), (1.0, 0.0)], false),
            LineSegment::from_points([(5.0, 5.0)], false),
            LineSegment::from_points([(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)], false),
        ];
        let (mesh, ranges) = tessellate_segments_with_ranges(&segments, &raw_params(1.0)).unwrap();

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].segment_index, 0);
        assert_eq!(ranges[1].segment_index, 2);
        assert_eq!(ranges[1].first_vertex, 5);
        assert_eq!(ranges[1].vertex_count, 10);
        assert_eq!(ranges[1].first_triangle, 2);
        assert_eq!(mesh.vertex_count(), 15);
    }

    #[test]
    fn test_invalid_thickness_rejected() {
        let segments = vec![LineSegment::from_points([(0.0, 0.0), (1.0, 0.0)], false)];
        assert!(tessellate_segments(&segments, &raw_params(0.0)).is_err());
    }
}
