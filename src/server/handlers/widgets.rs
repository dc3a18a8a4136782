//! Widget lifecycle: CreateWidget, ListWidgets, Close

use crate::draw::renderer::LineRenderer;
use crate::draw::tessellation::{DegenerateSegments, LineParams};
use crate::server::protocol::{error_codes, parse_params, Response};
use crate::server::state::ServerState;
use serde::Deserialize;

use super::{mesh_summary, operation_failed};

/// Handle CreateWidget request - registers a new empty line widget
pub fn handle_create_widget(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct CreateParams {
        widget_id: String,
        #[serde(default)]
        width: f32,
        #[serde(default)]
        height: f32,
        thickness: Option<f32>,
        center: Option<bool>,
        color: Option<[f32; 4]>,
        degenerate: Option<DegenerateSegments>,
    }

    let params: CreateParams = match parse_params(&id, params,
        "{widget_id: string, width?: f32, height?: f32, thickness?: f32, center?: bool, color?: [f32; 4], degenerate?: \"Skip\" | \"AbortBuild\"}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    if state.has_widget(&params.widget_id) {
        return Response::error(id, error_codes::INVALID_PARAMS,
            format!("Widget already exists: {}", params.widget_id));
    }

    let defaults = LineParams::default();
    let line_params = defaults
        .with_rect_size(params.width, params.height)
        .with_thickness(params.thickness.unwrap_or(defaults.thickness))
        .with_center_offset(params.center.unwrap_or(defaults.center_offset))
        .with_color(params.color.unwrap_or(defaults.color))
        .with_degenerate(params.degenerate.unwrap_or(defaults.degenerate));

    let renderer = match LineRenderer::with_params(line_params) {
        Ok(r) => r,
        Err(e) => return operation_failed(id, e),
    };

    log::info!("[Line Server] Created widget {} ({}x{})", params.widget_id, params.width, params.height);

    let response = mesh_summary(id, &params.widget_id, &renderer);
    state.widgets.insert(params.widget_id, renderer);
    response
}

/// Handle ListWidgets request - returns widget ids in creation order
pub fn handle_list_widgets(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    let widget_ids: Vec<&String> = state.widgets.keys().collect();
    Response::success(id, serde_json::json!(widget_ids))
}

/// Handle Close request - drops a widget and its mesh
pub fn handle_close(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct CloseParams {
        widget_id: String,
    }

    let params: CloseParams = match parse_params(&id, params, "{widget_id: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.widgets.shift_remove(&params.widget_id) {
        Some(_) => {
            log::info!("[Line Server] Closed widget {}", params.widget_id);
            Response::success(id, serde_json::json!({ "status": "ok" }))
        }
        None => Response::error(id, error_codes::WIDGET_NOT_FOUND,
            format!("Widget not found: {}", params.widget_id)),
    }
}
