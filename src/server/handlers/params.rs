//! Rendering parameters: SetThickness, SetColor, SetLayout

use crate::draw::tessellation::DegenerateSegments;
use crate::server::protocol::{parse_params, Response};
use crate::server::state::ServerState;
use serde::Deserialize;

use super::{mesh_summary, operation_failed, widget_mut};

/// Handle SetThickness request - non-positive or non-finite values are rejected
pub fn handle_set_thickness(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ThicknessParams {
        widget_id: String,
        thickness: f32,
    }

    let params: ThicknessParams = match parse_params(&id, params, "{widget_id: string, thickness: f32}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    match renderer.set_thickness(params.thickness) {
        Ok(()) => mesh_summary(id, &params.widget_id, renderer),
        Err(e) => operation_failed(id, e),
    }
}

/// Handle SetColor request - updates the fill color of every vertex
pub fn handle_set_color(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ColorParams {
        widget_id: String,
        color: [f32; 4],
    }

    let params: ColorParams = match parse_params(&id, params, "{widget_id: string, color: [f32; 4]}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    log::debug!("[Line Server] Widget {}: color {:?}", params.widget_id, params.color);
    renderer.set_color(params.color);
    mesh_summary(id, &params.widget_id, renderer)
}

/// Handle SetLayout request - centering flag, widget rect size and degenerate-segment policy
pub fn handle_set_layout(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct LayoutParams {
        widget_id: String,
        center: Option<bool>,
        width: Option<f32>,
        height: Option<f32>,
        degenerate: Option<DegenerateSegments>,
    }

    let params: LayoutParams = match parse_params(&id, params,
        "{widget_id: string, center?: bool, width?: f32, height?: f32, degenerate?: \"Skip\" | \"AbortBuild\"}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    // Size is the only fallible part, apply it before anything else changes
    if params.width.is_some() || params.height.is_some() {
        let current = renderer.params().rect_size;
        if let Err(e) = renderer.set_rect_size(params.width.unwrap_or(current.x), params.height.unwrap_or(current.y)) {
            return operation_failed(id, e);
        }
    }
    if let Some(center) = params.center {
        renderer.set_center(center);
    }
    if let Some(policy) = params.degenerate {
        log::debug!("[Line Server] Widget {}: degenerate segments {:?}", params.widget_id, policy);
        renderer.set_degenerate_policy(policy);
    }

    mesh_summary(id, &params.widget_id, renderer)
}
