//! Host-side line widget state
//!
//! [`LineRenderer`] owns the line set and rendering parameters, routes point
//! edits to an explicit active segment, and rebuilds the mesh from scratch
//! after every mutation so the cached mesh always matches its inputs.

use crate::draw::geometry::{LineMesh, LineSegment, LineSet, Point};
use crate::draw::tessellation::{
    tessellate_segments_with_ranges, validate_rect_size, validate_thickness, DegenerateSegments, LineParams, SegmentRange,
};
use anyhow::anyhow;

#[derive(Debug, Clone)]
pub struct LineRenderer {
    lines: LineSet,
    params: LineParams,
    active_segment: Option<usize>,
    mesh: LineMesh,
    ranges: Vec<SegmentRange>,
    generation: u64,
}

impl Default for LineRenderer {
    fn default() -> Self {
        LineRenderer {
            lines: LineSet::new(),
            params: LineParams::default(),
            active_segment: None,
            mesh: LineMesh::new(),
            ranges: Vec::new(),
            generation: 0,
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom parameters
    pub fn with_params(params: LineParams) -> anyhow::Result<Self> {
        params.validate()?;
        Ok(LineRenderer {
            params,
            ..Self::default()
        })
    }

    /// Create a renderer over existing lines and build its mesh
    pub fn from_lines(lines: LineSet, params: LineParams) -> anyhow::Result<Self> {
        let mut renderer = Self::with_params(params)?;
        renderer.lines = lines;
        renderer.rebuild();
        Ok(renderer)
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn params(&self) -> &LineParams {
        &self.params
    }

    /// The mesh from the last rebuild
    pub fn mesh(&self) -> &LineMesh {
        &self.mesh
    }

    /// Per-segment vertex/triangle ranges from the last rebuild
    pub fn segment_ranges(&self) -> &[SegmentRange] {
        &self.ranges
    }

    /// Incremented on every rebuild, so callers know when to re-upload
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Segment that point edits apply to: the selected one, else the last one
    pub fn active_segment(&self) -> Option<usize> {
        match self.active_segment {
            Some(idx) if idx < self.lines.len() => Some(idx),
            _ => self.lines.len().checked_sub(1),
        }
    }

    pub fn set_active_segment(&mut self, index: usize) -> anyhow::Result<()> {
        if index >= self.lines.len() {
            return Err(segment_out_of_range(index, self.lines.len()));
        }
        self.active_segment = Some(index);
        Ok(())
    }

    /// Start a new empty segment and make it active
    pub fn add_segment(&mut self) -> usize {
        self.push_segment(LineSegment::new())
    }

    /// Append a prepared segment and make it active
    pub fn push_segment(&mut self, segment: LineSegment) -> usize {
        let idx = self.lines.push(segment);
        self.active_segment = Some(idx);
        self.rebuild();
        idx
    }

    /// Append a point to the active segment, creating one if there is none
    pub fn add_point(&mut self, point: Point) -> usize {
        let idx = match self.active_segment() {
            Some(idx) => idx,
            None => {
                let idx = self.lines.push(LineSegment::new());
                self.active_segment = Some(idx);
                idx
            }
        };

        if let Some(segment) = self.lines.get_mut(idx) {
            segment.add_point(point);
        }
        self.rebuild();
        idx
    }

    /// Insert a point into the active segment before `index`
    pub fn insert_point(&mut self, index: usize, point: Point) -> anyhow::Result<usize> {
        let idx = match self.active_segment() {
            Some(idx) => idx,
            None => {
                let idx = self.lines.push(LineSegment::new());
                self.active_segment = Some(idx);
                idx
            }
        };

        let segment = self
            .lines
            .get_mut(idx)
            .ok_or_else(|| segment_out_of_range(idx, 0))?;
        segment.insert_point(index, point)?;
        self.rebuild();
        Ok(idx)
    }

    /// Remove a point from the active segment
    ///
    /// With no segments at all this is a no-op and returns `Ok(None)`.
    pub fn remove_point(&mut self, index: usize) -> anyhow::Result<Option<Point>> {
        let Some(idx) = self.active_segment() else {
            return Ok(None);
        };

        let segment = self
            .lines
            .get_mut(idx)
            .ok_or_else(|| segment_out_of_range(idx, 0))?;
        let removed = segment.remove_point(index)?;
        self.rebuild();
        Ok(Some(removed))
    }

    /// Drop every segment
    pub fn clear_points(&mut self) {
        self.lines.clear();
        self.active_segment = None;
        self.rebuild();
    }

    pub fn set_thickness(&mut self, thickness: f32) -> anyhow::Result<()> {
        validate_thickness(thickness)?;
        self.params.thickness = thickness;
        self.rebuild();
        Ok(())
    }

    pub fn set_looped(&mut self, segment_index: usize, looped: bool) -> anyhow::Result<()> {
        let len = self.lines.len();
        let segment = self
            .lines
            .get_mut(segment_index)
            .ok_or_else(|| segment_out_of_range(segment_index, len))?;
        segment.set_closed(looped);
        self.rebuild();
        Ok(())
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.params.color = color;
        self.rebuild();
    }

    pub fn set_center(&mut self, center: bool) {
        self.params.center_offset = center;
        self.rebuild();
    }

    /// Update the widget's bounding box size used for centering
    pub fn set_rect_size(&mut self, width: f32, height: f32) -> anyhow::Result<()> {
        validate_rect_size(width, height)?;
        self.params.rect_size = Point::new(width, height);
        self.rebuild();
        Ok(())
    }

    /// Choose how segments with fewer than two points affect the build
    pub fn set_degenerate_policy(&mut self, policy: DegenerateSegments) {
        self.params.degenerate = policy;
        self.rebuild();
    }

    /// Rebuild the mesh from scratch
    pub fn rebuild(&mut self) -> &LineMesh {
        match tessellate_segments_with_ranges(self.lines.segments(), &self.params) {
            Ok((mesh, ranges)) => {
                self.mesh = mesh;
                self.ranges = ranges;
            }
            Err(e) => {
                // Parameters are validated on the way in, so this means they were bypassed
                log::warn!("Mesh rebuild failed, clearing mesh: {}", e);
                self.mesh.clear();
                self.ranges.clear();
            }
        }
        self.generation += 1;

        log::trace!(
            "Rebuilt line mesh #{}: {} segments -> {} vertices, {} triangles",
            self.generation,
            self.lines.len(),
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );

        &self.mesh
    }
}

fn segment_out_of_range(index: usize, len: usize) -> anyhow::Error {
    anyhow!("Segment index out of range: {} (renderer has {} segments)", index, len)
}
