//! Beveled ribbon tessellation for UI line widgets
//!
//! Polylines (open or closed) become a single triangle mesh of thickened,
//! beveled strips ready for upload to a 2D canvas renderer.
//!
//! - `draw::geometry` - points, segments, line sets and mesh output
//! - `draw::tessellation` - the ribbon tessellator and its parameters
//! - `draw::renderer` - host-side widget state that rebuilds on every edit
//! - `document` - JSON / MessagePack persistence of a widget
//! - `server` - stdio JSON-RPC host for remote clients

pub mod document;
pub mod draw;
pub mod server;

pub use document::{load_line_document, save_line_document, LineDocument};
pub use draw::geometry::{LineMesh, LineSegment, LineSet, MeshVertex, Point};
pub use draw::renderer::LineRenderer;
pub use draw::tessellation::{tessellate_line_set, DegenerateSegments, LineParams};
