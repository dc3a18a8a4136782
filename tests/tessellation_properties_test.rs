// Mesh shape properties of the ribbon tessellator
use ui_line_renderer::{tessellate_line_set, DegenerateSegments, LineMesh, LineParams, LineSegment, LineSet, Point};

fn raw_params(thickness: f32) -> LineParams {
    LineParams::default()
        .with_thickness(thickness)
        .with_center_offset(false)
}

fn zigzag(n: usize) -> Vec<(f32, f32)> {
    (0..n)
        .map(|i| (i as f32 * 3.0, if i % 2 == 0 { 0.0 } else { 2.0 }))
        .collect()
}

fn build(segments: Vec<LineSegment>, params: &LineParams) -> LineMesh {
    let lines: LineSet = segments.into_iter().collect();
    tessellate_line_set(&lines, params).expect("Tessellation failed")
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_open_segment_counts() {
    for n in 2..12 {
        let mesh = build(vec![LineSegment::from_points(zigzag(n), false)], &raw_params(1.0));
        assert_eq!(mesh.vertex_count(), 5 * (n - 1), "vertices for n={}", n);
        assert_eq!(mesh.triangle_count(), 2 * (n - 1) + 2 * (n - 2), "triangles for n={}", n);
    }
}

#[test]
fn test_closed_segment_adds_closing_edge_and_seal() {
    for n in 3..12 {
        let open = build(vec![LineSegment::from_points(zigzag(n), false)], &raw_params(1.0));
        let closed = build(vec![LineSegment::from_points(zigzag(n), true)], &raw_params(1.0));

        assert_eq!(closed.vertex_count(), open.vertex_count() + 5, "n={}", n);
        assert_eq!(closed.triangle_count(), open.triangle_count() + 6, "n={}", n);
        // Everything before the closing edge is identical
        assert_eq!(&closed.vertices[..open.vertex_count()], &open.vertices[..]);
        assert_eq!(&closed.triangles[..open.triangle_count()], &open.triangles[..]);
    }
}

#[test]
fn test_closed_two_points_matches_open() {
    let points = [(0.0, 0.0), (10.0, 0.0)];
    let open = build(vec![LineSegment::from_points(points, false)], &raw_params(2.0));
    let closed = build(vec![LineSegment::from_points(points, true)], &raw_params(2.0));

    assert_eq!(open, closed);
    assert_eq!(closed.vertex_count(), 5);
    assert_eq!(closed.triangle_count(), 2);
}

#[test]
fn test_degenerate_and_empty_inputs() {
    assert!(build(vec![], &raw_params(1.0)).is_empty());
    assert!(build(vec![LineSegment::new()], &raw_params(1.0)).is_empty());
    assert!(build(vec![LineSegment::from_points([(1.0, 1.0)], true)], &raw_params(1.0)).is_empty());
}

#[test]
fn test_degenerate_policy() {
    let segments = vec![
        LineSegment::from_points([(0.0, 0.0), (5.0, 0.0)], false),
        LineSegment::from_points([(1.0, 1.0)], false),
        LineSegment::from_points([(0.0, 5.0), (5.0, 5.0)], false),
    ];

    let skipped = build(segments.clone(), &raw_params(1.0));
    assert_eq!(skipped.vertex_count(), 10);
    assert_eq!(skipped.triangle_count(), 4);

    let aborted = build(segments, &raw_params(1.0).with_degenerate(DegenerateSegments::AbortBuild));
    assert!(aborted.is_empty());
}

#[test]
fn test_indices_in_bounds_for_many_segments() {
    let segments: Vec<LineSegment> = (2..9)
        .map(|n| LineSegment::from_points(zigzag(n), n % 2 == 1))
        .collect();
    let mesh = build(segments, &raw_params(0.5));

    assert!(mesh.indices_in_bounds());
    assert!(mesh.max_index().unwrap() < mesh.vertex_count() as u32);
}

#[test]
fn test_second_segment_does_not_reference_first() {
    let first = LineSegment::from_points([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)], true);
    let second = LineSegment::from_points([(10.0, 0.0), (14.0, 0.0), (14.0, 4.0)], true);

    let first_only = build(vec![first.clone()], &raw_params(1.0));
    let both = build(vec![first, second], &raw_params(1.0));

    let first_verts = first_only.vertex_count() as u32;
    for tri in &both.triangles[first_only.triangle_count()..] {
        assert!(tri.iter().all(|&idx| idx >= first_verts), "triangle {:?} crosses segments", tri);
    }
    for tri in &both.triangles[..first_only.triangle_count()] {
        assert!(tri.iter().all(|&idx| idx < first_verts), "triangle {:?} crosses segments", tri);
    }
}

#[test]
fn test_center_offset_shifts_by_half_rect() {
    let segment = LineSegment::from_points([(3.0, 7.0), (20.0, 9.0)], false);
    let base = LineParams::default().with_thickness(2.0).with_rect_size(100.0, 40.0);

    let raw = build(vec![segment.clone()], &base.with_center_offset(false));
    let centered = build(vec![segment], &base.with_center_offset(true));

    assert_eq!(raw.vertex_count(), centered.vertex_count());
    for (r, c) in raw.vertices.iter().zip(&centered.vertices) {
        assert!(approx(c.position.x, r.position.x - 50.0));
        assert!(approx(c.position.y, r.position.y - 20.0));
    }
    assert_eq!(raw.triangles, centered.triangles);
}

#[test]
fn test_horizontal_example() {
    let mesh = build(
        vec![LineSegment::from_points([(0.0, 0.0), (10.0, 0.0)], false)],
        &raw_params(2.0),
    );

    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 2);

    let expected = [
        Point::new(0.0, -1.0),
        Point::new(0.0, 1.0),
        Point::new(10.0, -1.0),
        Point::new(10.0, 1.0),
        Point::new(10.0, 0.0),
    ];
    for (v, e) in mesh.vertices.iter().zip(expected) {
        assert!(approx(v.position.x, e.x) && approx(v.position.y, e.y), "{:?} != {:?}", v.position, e);
    }
}

#[test]
fn test_closed_triangle_example() {
    let mesh = build(
        vec![LineSegment::from_points([(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)], true)],
        &raw_params(1.0),
    );

    assert_eq!(mesh.vertex_count(), 15);
    assert_eq!(mesh.triangle_count(), 12);
    // Closing anchor sits on the first point
    let anchor = mesh.vertices[14].position;
    assert!(approx(anchor.x, 0.0) && approx(anchor.y, 0.0));
    assert_eq!(&mesh.triangles[10..], &[[0, 14, 12], [1, 14, 13]]);
}

#[test]
fn test_quad_winding_is_clockwise_in_y_up() {
    let mesh = build(
        vec![LineSegment::from_points([(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)], false)],
        &raw_params(1.0),
    );

    // Quads are the first two triangles of every edge: 0,1 then 2,3 after 2 bevels, ...
    let quad_triangles = [0usize, 1, 2, 3, 6, 7];
    // Clockwise with y up, i.e. counter-clockwise on a y-down screen
    assert!(approx(mesh.signed_area(0).unwrap(), -5.0));
    for t in quad_triangles {
        assert!(mesh.signed_area(t).unwrap() < 0.0, "triangle {}", t);
    }
}

#[test]
fn test_coincident_points_are_not_an_error() {
    let mesh = build(
        vec![LineSegment::from_points([(1.0, 1.0), (1.0, 1.0), (2.0, 1.0)], false)],
        &raw_params(1.0),
    );
    assert_eq!(mesh.vertex_count(), 10);
    assert!(mesh.vertices.iter().all(|v| v.position.x.is_finite() && v.position.y.is_finite()));
}

#[test]
fn test_fill_color_applied_to_every_vertex() {
    let color = [0.2, 0.4, 0.6, 0.8];
    let mesh = build(
        vec![LineSegment::from_points(zigzag(5), true)],
        &raw_params(1.0).with_color(color),
    );
    assert!(mesh.vertices.iter().all(|v| v.color == color));
}
