//! Segment edits: AddSegment, SetActiveSegment, AddPoint, RemovePoint, ClearPoints, SetLooped

use crate::draw::geometry::Point;
use crate::server::protocol::{parse_params, Response};
use crate::server::state::ServerState;
use serde::Deserialize;

use super::{mesh_summary, operation_failed, widget_mut};

#[derive(Deserialize)]
struct WidgetParams {
    widget_id: String,
}

/// Handle AddSegment request - starts a new segment and makes it active
pub fn handle_add_segment(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: WidgetParams = match parse_params(&id, params, "{widget_id: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let segment = renderer.add_segment();
    log::debug!("[Line Server] Widget {}: added segment {}", params.widget_id, segment);
    mesh_summary(id, &params.widget_id, renderer)
}

/// Handle SetActiveSegment request - selects the segment point edits go to
pub fn handle_set_active_segment(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct ActiveParams {
        widget_id: String,
        segment: usize,
    }

    let params: ActiveParams = match parse_params(&id, params, "{widget_id: string, segment: usize}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    match renderer.set_active_segment(params.segment) {
        Ok(()) => mesh_summary(id, &params.widget_id, renderer),
        Err(e) => operation_failed(id, e),
    }
}

/// Handle AddPoint request - appends (or inserts at `index`) into the active segment
pub fn handle_add_point(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct AddPointParams {
        widget_id: String,
        x: f32,
        y: f32,
        index: Option<usize>,
    }

    let params: AddPointParams = match parse_params(&id, params, "{widget_id: string, x: f32, y: f32, index?: usize}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    let point = Point::new(params.x, params.y);
    let result = match params.index {
        Some(index) => renderer.insert_point(index, point),
        None => Ok(renderer.add_point(point)),
    };

    match result {
        Ok(segment) => {
            log::debug!("[Line Server] Widget {}: point ({:.2}, {:.2}) -> segment {}",
                params.widget_id, params.x, params.y, segment);
            mesh_summary(id, &params.widget_id, renderer)
        }
        Err(e) => operation_failed(id, e),
    }
}

/// Handle RemovePoint request - removes a point from the active segment
pub fn handle_remove_point(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct RemovePointParams {
        widget_id: String,
        index: usize,
    }

    let params: RemovePointParams = match parse_params(&id, params, "{widget_id: string, index: usize}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    match renderer.remove_point(params.index) {
        Ok(removed) => {
            if removed.is_none() {
                log::debug!("[Line Server] Widget {}: no segments, nothing removed", params.widget_id);
            }
            mesh_summary(id, &params.widget_id, renderer)
        }
        Err(e) => operation_failed(id, e),
    }
}

/// Handle ClearPoints request - drops every segment of a widget
pub fn handle_clear_points(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let params: WidgetParams = match parse_params(&id, params, "{widget_id: string}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    renderer.clear_points();
    log::info!("[Line Server] Widget {}: cleared", params.widget_id);
    mesh_summary(id, &params.widget_id, renderer)
}

/// Handle SetLooped request - toggles the closed flag of a segment
pub fn handle_set_looped(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct LoopedParams {
        widget_id: String,
        segment: usize,
        looped: bool,
    }

    let params: LoopedParams = match parse_params(&id, params, "{widget_id: string, segment: usize, looped: bool}") {
        Ok(p) => p,
        Err(response) => return response,
    };

    let renderer = match widget_mut(state, &id, &params.widget_id) {
        Ok(r) => r,
        Err(response) => return response,
    };

    match renderer.set_looped(params.segment, params.looped) {
        Ok(()) => mesh_summary(id, &params.widget_id, renderer),
        Err(e) => operation_failed(id, e),
    }
}
