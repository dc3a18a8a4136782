//! Core geometry types for the line renderer
//!
//! This module contains the fundamental primitives the tessellator consumes:
//! points, line segments (polylines with a closed flag) and line sets.

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Opaque white, the default fill color of a line widget
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

/// A single polyline: ordered points plus a closed flag
///
/// The point list is only reachable read-only through [`LineSegment::points`];
/// all mutation goes through the explicit add/insert/remove operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    #[serde(default)]
    points: Vec<Point>,
    #[serde(default)]
    closed: bool,
}

impl LineSegment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a segment from (x, y) pairs
    pub fn from_points<I>(points: I, closed: bool) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        LineSegment {
            points: points.into_iter().map(Point::from).collect(),
            closed,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append a point to the end of the polyline
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Insert a point before `index` (`index == len` appends)
    pub fn insert_point(&mut self, index: usize, point: Point) -> anyhow::Result<()> {
        if index > self.points.len() {
            bail!(
                "Point index out of range: {} (segment has {} points)",
                index,
                self.points.len()
            );
        }
        self.points.insert(index, point);
        Ok(())
    }

    /// Remove and return the point at `index`
    pub fn remove_point(&mut self, index: usize) -> anyhow::Result<Point> {
        if index >= self.points.len() {
            bail!(
                "Point index out of range: {} (segment has {} points)",
                index,
                self.points.len()
            );
        }
        Ok(self.points.remove(index))
    }

    /// Overwrite the closed flag. Does not trigger a rebuild.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Whether the closing edge back to the first point will be tessellated
    pub fn renders_closed(&self) -> bool {
        self.closed && self.points.len() > 2
    }
}

/// Everything drawn in one pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSet {
    segments: Vec<LineSegment>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment and return its index
    pub fn push(&mut self, segment: LineSegment) -> usize {
        self.segments.push(segment);
        self.segments.len() - 1
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn get(&self, index: usize) -> Option<&LineSegment> {
        self.segments.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut LineSegment> {
        self.segments.get_mut(index)
    }

    /// Total number of points across all segments
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(LineSegment::len).sum()
    }
}

impl FromIterator<LineSegment> for LineSet {
    fn from_iter<T: IntoIterator<Item = LineSegment>>(iter: T) -> Self {
        LineSet {
            segments: iter.into_iter().collect(),
        }
    }
}
