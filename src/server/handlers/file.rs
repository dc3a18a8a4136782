//! File operations: Load, Save

use crate::document::{load_line_document, save_line_document, LineDocument};
use crate::server::protocol::{error_codes, parse_params, Response};
use crate::server::state::ServerState;
use serde::Deserialize;
use std::time::Instant;

use super::mesh_summary;

#[derive(Deserialize)]
struct FileParams {
    widget_id: String,
    file_path: String,
}

/// Handle Load request - reads a line document into a widget, replacing it if present
pub fn handle_load(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: FileParams = match parse_params(&id, params, "{widget_id: string, file_path: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    log::info!("[Line Server] Loading file: {}", params.file_path);
    let start_total = Instant::now();

    let renderer = match load_line_document(&params.file_path).and_then(LineDocument::into_renderer) {
        Ok(r) => r,
        Err(e) => {
            return Response::error(id, error_codes::LOAD_FAILED,
                format!("Failed to load {}: {:#}", params.file_path, e));
        }
    };

    log::info!("[Line Server] Loaded {} segments ({} points) into widget {} in {:.2?}",
        renderer.lines().len(), renderer.lines().point_count(), params.widget_id, start_total.elapsed());

    let response = mesh_summary(id, &params.widget_id, &renderer);
    state.widgets.insert(params.widget_id, renderer);
    response
}

/// Handle Save request - writes a widget's lines and parameters to disk
pub fn handle_save(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: FileParams = match parse_params(&id, params, "{widget_id: string, file_path: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let Some(renderer) = state.widget(&params.widget_id) else {
        return Response::error(id, error_codes::WIDGET_NOT_FOUND,
            format!("Widget not found: {}", params.widget_id));
    };

    let doc = LineDocument::from_renderer(renderer);
    match save_line_document(&doc, &params.file_path) {
        Ok(()) => {
            log::info!("[Line Server] Saved widget {} to {}", params.widget_id, params.file_path);
            Response::success(id, serde_json::json!({
                "status": "ok",
                "file_path": params.file_path,
            }))
        }
        Err(e) => Response::error(id, error_codes::SAVE_FAILED,
            format!("Failed to save {}: {:#}", params.file_path, e)),
    }
}
