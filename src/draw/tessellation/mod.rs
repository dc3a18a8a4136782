//! Tessellation module for UI lines
//!
//! This module converts line segments into beveled ribbon triangle meshes
//! for GPU rendering.
//!
//! # Submodules
//! - `params` - Thickness, centering, color and degenerate-segment policy
//! - `polyline` - Ribbon stroking with bevel joins and loop closure

mod params;
mod polyline;

pub use params::{
    DegenerateSegments,
    LineParams,
    validate_rect_size,
    validate_thickness,
};

pub use polyline::{
    VERTS_PER_EDGE,
    SegmentRange,
    segment_mesh_size,
    tessellate_segment,
    tessellate_segments,
    tessellate_segments_with_ranges,
    tessellate_line_set,
};
