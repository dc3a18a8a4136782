//! Handler module declarations, shared helpers and request dispatch

pub mod file;
pub mod params;
pub mod segments;
pub mod tessellation;
pub mod widgets;

// Re-export all handlers for convenient access
pub use file::*;
pub use params::*;
pub use segments::*;
pub use tessellation::*;
pub use widgets::*;

use crate::draw::renderer::LineRenderer;
use crate::server::protocol::{error_codes, Request, Response};
use crate::server::state::ServerState;
use crate::server::util::{debug_print_mesh, should_debug_widget};

/// Look up a widget or produce a WIDGET_NOT_FOUND response
pub(crate) fn widget_mut<'a>(
    state: &'a mut ServerState,
    id: &Option<serde_json::Value>,
    widget_id: &str,
) -> Result<&'a mut LineRenderer, Response> {
    state.widget_mut(widget_id).ok_or_else(|| {
        Response::error(
            id.clone(),
            error_codes::WIDGET_NOT_FOUND,
            format!("Widget not found: {}", widget_id),
        )
    })
}

/// Success response describing the widget's freshly rebuilt mesh
pub(crate) fn mesh_summary(id: Option<serde_json::Value>, widget_id: &str, renderer: &LineRenderer) -> Response {
    if should_debug_widget(widget_id) {
        debug_print_mesh(widget_id, renderer.mesh());
    }

    Response::success(id, serde_json::json!({
        "status": "ok",
        "widget_id": widget_id,
        "segment_count": renderer.lines().len(),
        "active_segment": renderer.active_segment(),
        "vertex_count": renderer.mesh().vertex_count(),
        "triangle_count": renderer.mesh().triangle_count(),
        "generation": renderer.generation(),
    }))
}

/// Map an operation error onto an OPERATION_FAILED response
pub(crate) fn operation_failed(id: Option<serde_json::Value>, err: anyhow::Error) -> Response {
    Response::error(id, error_codes::OPERATION_FAILED, err.to_string())
}

/// Route one request to its handler and return the response line
pub fn dispatch(state: &mut ServerState, request: Request) -> String {
    state.requests_handled += 1;
    let Request { id, method, params } = request;

    let response = match method.as_str() {
        "CreateWidget" => handle_create_widget(state, id, params),
        "ListWidgets" => handle_list_widgets(state, id),
        "Close" => handle_close(state, id, params),
        "AddSegment" => handle_add_segment(state, id, params),
        "SetActiveSegment" => handle_set_active_segment(state, id, params),
        "AddPoint" => handle_add_point(state, id, params),
        "RemovePoint" => handle_remove_point(state, id, params),
        "ClearPoints" => handle_clear_points(state, id, params),
        "SetLooped" => handle_set_looped(state, id, params),
        "SetThickness" => handle_set_thickness(state, id, params),
        "SetColor" => handle_set_color(state, id, params),
        "SetLayout" => handle_set_layout(state, id, params),
        "GetMesh" => handle_get_mesh(state, id, params),
        // Binary responses bypass the JSON envelope
        "GetMeshBinary" => return handle_get_mesh_binary(state, id, params),
        "Load" => handle_load(state, id, params),
        "Save" => handle_save(state, id, params),
        _ => Response::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        ),
    };

    response.to_line()
}
