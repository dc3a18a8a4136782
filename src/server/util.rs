//! Utility functions for the line server

use crate::draw::geometry::LineMesh;
use std::env;

/// Maximum triangles printed per mesh by the debug dump
const DEBUG_TRIANGLE_LIMIT: usize = 200;

/// Initialise stderr logging; stdout carries the protocol
///
/// Level comes from `RUST_LOG`, defaulting to `info`. Safe to call twice.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// `PROFILE_TIMING` set to anything turns on timing lines
pub fn profile_timing_enabled() -> bool {
    env::var("PROFILE_TIMING").is_ok()
}

/// `DEBUG_TESSELLATION_WIDGET` empty dumps every widget, otherwise a comma list of ids
pub fn should_debug_widget(widget_id: &str) -> bool {
    match env::var("DEBUG_TESSELLATION_WIDGET") {
        Ok(val) => {
            if val.trim().is_empty() {
                true
            } else {
                val.split(',').any(|entry| entry.trim() == widget_id)
            }
        }
        Err(_) => false,
    }
}

/// Render a triangle dump for a mesh, one line per triangle
pub fn format_triangle_dump(mesh: &LineMesh, limit: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (tri_idx, tri) in mesh.triangles.iter().enumerate() {
        if tri_idx >= limit {
            break;
        }
        let corners: Vec<String> = tri
            .iter()
            .map(|&idx| match mesh.vertices.get(idx as usize) {
                Some(v) => format!("#{} [{:.3}, {:.3}]", idx, v.position.x, v.position.y),
                None => format!("#{} [missing]", idx),
            })
            .collect();
        lines.push(format!(" Triangle {}: {}", tri_idx, corners.join(", ")));
    }
    lines
}

pub(crate) fn debug_print_mesh(widget_id: &str, mesh: &LineMesh) {
    log::info!(
        "[Line Server] Widget {}: {} triangles ({} vertices), first {} shown",
        widget_id,
        mesh.triangle_count(),
        mesh.vertex_count(),
        DEBUG_TRIANGLE_LIMIT.min(mesh.triangle_count())
    );
    for line in format_triangle_dump(mesh, DEBUG_TRIANGLE_LIMIT) {
        log::info!("{}", line);
    }
}
