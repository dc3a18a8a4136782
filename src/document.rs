//! Line document persistence
//!
//! A document stores everything needed to rebuild a line widget: its
//! rendering parameters and all segments. Files ending in `.msgpack` or `.mpk`
//! are written as MessagePack, everything else as pretty-printed JSON.

use crate::draw::geometry::{LineSet, WHITE};
use crate::draw::renderer::LineRenderer;
use crate::draw::tessellation::{DegenerateSegments, LineParams};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current document format version
pub const DOCUMENT_VERSION: u32 = 1;

fn default_thickness() -> f32 {
    1.0
}

fn default_center() -> bool {
    true
}

fn default_color() -> [f32; 4] {
    WHITE
}

/// Serialized form of a line widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDocument {
    pub version: u32,
    #[serde(default = "default_thickness")]
    pub thickness: f32,
    #[serde(default = "default_center")]
    pub center: bool,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub degenerate: DegenerateSegments,
    #[serde(default)]
    pub segments: LineSet,
}

impl LineDocument {
    /// Snapshot a renderer's lines and parameters
    pub fn from_renderer(renderer: &LineRenderer) -> Self {
        let params = renderer.params();
        LineDocument {
            version: DOCUMENT_VERSION,
            thickness: params.thickness,
            center: params.center_offset,
            color: params.color,
            width: params.rect_size.x,
            height: params.rect_size.y,
            degenerate: params.degenerate,
            segments: renderer.lines().clone(),
        }
    }

    pub fn params(&self) -> LineParams {
        LineParams::default()
            .with_thickness(self.thickness)
            .with_center_offset(self.center)
            .with_color(self.color)
            .with_rect_size(self.width, self.height)
            .with_degenerate(self.degenerate)
    }

    /// Build a renderer from this document, validating its parameters
    pub fn into_renderer(self) -> anyhow::Result<LineRenderer> {
        let params = self.params();
        LineRenderer::from_lines(self.segments, params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    MessagePack,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("msgpack") | Some("mpk") => DocumentFormat::MessagePack,
            _ => DocumentFormat::Json,
        }
    }
}

/// Encode a document in the given format
pub fn encode_document(doc: &LineDocument, format: DocumentFormat) -> anyhow::Result<Vec<u8>> {
    let bytes = match format {
        DocumentFormat::Json => serde_json::to_vec_pretty(doc).context("Failed to encode JSON document")?,
        DocumentFormat::MessagePack => {
            rmp_serde::to_vec_named(doc).context("Failed to encode MessagePack document")?
        }
    };
    Ok(bytes)
}

/// Decode a document in the given format
pub fn decode_document(bytes: &[u8], format: DocumentFormat) -> anyhow::Result<LineDocument> {
    let doc: LineDocument = match format {
        DocumentFormat::Json => serde_json::from_slice(bytes).context("Failed to parse JSON document")?,
        DocumentFormat::MessagePack => {
            rmp_serde::from_slice(bytes).context("Failed to parse MessagePack document")?
        }
    };

    if doc.version > DOCUMENT_VERSION {
        bail!(
            "Unsupported document version {} (newest supported is {})",
            doc.version,
            DOCUMENT_VERSION
        );
    }
    Ok(doc)
}

/// Load a line document from disk
///
/// # Example
/// ```ignore
/// let doc = load_line_document("drawing.json")?;
/// let renderer = doc.into_renderer()?;
/// ```
pub fn load_line_document<P: AsRef<Path>>(path: P) -> anyhow::Result<LineDocument> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    decode_document(&bytes, DocumentFormat::from_path(path))
}

/// Save a line document to disk
pub fn save_line_document<P: AsRef<Path>>(doc: &LineDocument, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = encode_document(doc, DocumentFormat::from_path(path))?;
    fs::write(path, bytes).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::{LineSegment, Point};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path("a.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("a.MSGPACK"), DocumentFormat::MessagePack);
        assert_eq!(DocumentFormat::from_path("a.mpk"), DocumentFormat::MessagePack);
        assert_eq!(DocumentFormat::from_path("noext"), DocumentFormat::Json);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = br#"{"version": 1, "segments": [{"points": [{"x": 0, "y": 0}, {"x": 4, "y": 0}]}]}"#;
        let doc = decode_document(json, DocumentFormat::Json).unwrap();

        assert_eq!(doc.thickness, 1.0);
        assert!(doc.center);
        assert_eq!(doc.color, WHITE);
        assert_eq!(doc.degenerate, DegenerateSegments::Skip);
        let segment = doc.segments.get(0).unwrap();
        assert!(!segment.is_closed());
        assert_eq!(segment.points()[1], Point::new(4.0, 0.0));
    }

    #[test]
    fn test_future_version_rejected() {
        let json = br#"{"version": 99}"#;
        let err = decode_document(json, DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Unsupported document version"));
    }

    #[test]
    fn test_messagepack_document() {
        let mut renderer = LineRenderer::new();
        renderer.add_point(Point::new(0.0, 0.0));
        renderer.add_point(Point::new(3.0, 4.0));
        renderer.set_rect_size(20.0, 10.0).unwrap();

        let doc = LineDocument::from_renderer(&renderer);
        let bytes = encode_document(&doc, DocumentFormat::MessagePack).unwrap();
        let decoded = decode_document(&bytes, DocumentFormat::MessagePack).unwrap();
        assert_eq!(decoded, doc);

        let rebuilt = decoded.into_renderer().unwrap();
        assert_eq!(rebuilt.mesh(), renderer.mesh());
    }

    #[test]
    fn test_degenerate_policy_survives_round_trip() {
        let lines: LineSet = [
            LineSegment::from_points([(0.0, 0.0), (5.0, 0.0)], false),
            LineSegment::from_points([(1.0, 1.0)], false),
        ]
        .into_iter()
        .collect();
        let params = LineParams::default().with_degenerate(DegenerateSegments::AbortBuild);
        let renderer = LineRenderer::from_lines(lines, params).unwrap();
        assert!(renderer.mesh().is_empty());

        let doc = LineDocument::from_renderer(&renderer);
        let bytes = encode_document(&doc, DocumentFormat::Json).unwrap();
        let rebuilt = decode_document(&bytes, DocumentFormat::Json).unwrap().into_renderer().unwrap();

        assert_eq!(rebuilt.params().degenerate, DegenerateSegments::AbortBuild);
        assert_eq!(rebuilt.mesh(), renderer.mesh());
    }

    #[test]
    fn test_negative_size_in_document_rejected() {
        let json = br#"{"version": 1, "width": -10.0, "height": 5.0}"#;
        let doc = decode_document(json, DocumentFormat::Json).unwrap();
        assert!(doc.into_renderer().is_err());
    }
}
