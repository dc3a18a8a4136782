//! Global rendering parameters for a tessellation pass

use crate::draw::geometry::{Point, WHITE};
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// What a build does when it meets a segment with fewer than two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegenerateSegments {
    /// Leave the segment out and keep tessellating the rest
    #[default]
    Skip,
    /// Stop the whole build and return an empty mesh
    AbortBuild,
}

/// Parameters shared by every segment in a build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineParams {
    /// Full ribbon width; each side is offset by half of this
    pub thickness: f32,
    /// Shift all output by minus half the widget rect so the drawing is centered
    pub center_offset: bool,
    pub color: [f32; 4],
    /// Widget bounding box size, only read when `center_offset` is set
    pub rect_size: Point,
    #[serde(default)]
    pub degenerate: DegenerateSegments,
}

impl Default for LineParams {
    fn default() -> Self {
        LineParams {
            thickness: 1.0,
            center_offset: true,
            color: WHITE,
            rect_size: Point::new(0.0, 0.0),
            degenerate: DegenerateSegments::Skip,
        }
    }
}

impl LineParams {
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_center_offset(mut self, center_offset: bool) -> Self {
        self.center_offset = center_offset;
        self
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_rect_size(mut self, width: f32, height: f32) -> Self {
        self.rect_size = Point::new(width, height);
        self
    }

    pub fn with_degenerate(mut self, degenerate: DegenerateSegments) -> Self {
        self.degenerate = degenerate;
        self
    }

    /// Offset subtracted from every vertex position
    pub fn origin_offset(&self) -> Point {
        if self.center_offset {
            Point::new(self.rect_size.x / 2.0, self.rect_size.y / 2.0)
        } else {
            Point::new(0.0, 0.0)
        }
    }

    /// Reject parameters that cannot produce a ribbon
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_thickness(self.thickness)?;
        validate_rect_size(self.rect_size.x, self.rect_size.y)
    }
}

/// Thickness must be finite and strictly positive; it is never clamped
pub fn validate_thickness(thickness: f32) -> anyhow::Result<()> {
    if !thickness.is_finite() || thickness <= 0.0 {
        bail!("Invalid thickness {}: must be a finite value greater than 0", thickness);
    }
    Ok(())
}

/// Widget rect dimensions must be finite and non-negative
pub fn validate_rect_size(width: f32, height: f32) -> anyhow::Result<()> {
    for value in [width, height] {
        if !value.is_finite() || value < 0.0 {
            bail!("Invalid widget size {}: must be finite and >= 0", value);
        }
    }
    Ok(())
}
