//! Tessellation handlers: GetMesh (JSON) and GetMeshBinary

use crate::draw::geometry::{serialize_mesh_binary, MeshJSON};
use crate::server::protocol::{error_codes, parse_params, Response};
use crate::server::state::ServerState;
use crate::server::util::profile_timing_enabled;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use std::time::Instant;

#[derive(Deserialize)]
struct MeshParams {
    widget_id: String,
    #[serde(default)]
    raw: bool,
}

/// Handle GetMesh request - returns the widget mesh as JSON
///
/// By default the buffers are base64-encoded; `raw: true` returns the plain
/// vertex and triangle lists instead.
pub fn handle_get_mesh(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: MeshParams = match parse_params(&id, params, "{widget_id: string, raw?: bool}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let Some(renderer) = state.widget(&params.widget_id) else {
        return Response::error(id, error_codes::WIDGET_NOT_FOUND,
            format!("Widget not found: {}", params.widget_id));
    };

    let start_serialize = Instant::now();

    let mesh_value = if params.raw {
        serde_json::to_value(renderer.mesh())
    } else {
        serde_json::to_value(MeshJSON::from_mesh(renderer.mesh()))
    };
    let (mesh_value, ranges_value) = match (mesh_value, serde_json::to_value(renderer.segment_ranges())) {
        (Ok(mesh), Ok(ranges)) => (mesh, ranges),
        (Err(e), _) | (_, Err(e)) => {
            return Response::error(id, error_codes::INTERNAL_ERROR,
                format!("Failed to serialize mesh: {}", e));
        }
    };

    if profile_timing_enabled() {
        log::info!("[Line Server] Serialization time for widget {}: {:.2?}",
            params.widget_id, start_serialize.elapsed());
    }

    Response::success(id, serde_json::json!({
        "widget_id": params.widget_id,
        "generation": renderer.generation(),
        "mesh": mesh_value,
        "segments": ranges_value,
    }))
}

/// Handle GetMeshBinary request - returns `BINARY:<id>:<base64>` instead of JSON
pub fn handle_get_mesh_binary(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> String {
    let params: MeshParams = match parse_params(&id, params, "{widget_id: string}") {
        Ok(p) => p,
        Err(response) => return response.to_line(),
    };

    let Some(renderer) = state.widget(&params.widget_id) else {
        return Response::error(id, error_codes::WIDGET_NOT_FOUND,
            format!("Widget not found: {}", params.widget_id)).to_line();
    };

    let start_serialize = Instant::now();
    let binary_data = match serialize_mesh_binary(renderer.mesh()) {
        Ok(data) => data,
        Err(e) => {
            return Response::error(id, error_codes::INTERNAL_ERROR,
                format!("Failed to serialize mesh: {:#}", e)).to_line();
        }
    };

    if profile_timing_enabled() {
        log::info!("[Line Server] Binary serialization time for widget {}: {:.2?}, size: {} bytes",
            params.widget_id, start_serialize.elapsed(), binary_data.len());
    }

    let id_str = match &id {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => "null".to_string(),
    };

    format!("BINARY:{}:{}", id_str, BASE64.encode(&binary_data))
}
