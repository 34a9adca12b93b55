// SPDX-License-Identifier: Apache-2.0
use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use centurion_proto::CenturionResponse;
use tower_http::catch_panic::CatchPanicLayer;

/// Converts an unhandled panic in any request handler into a 500 envelope,
/// mirroring the source's panic/recover boundary at the HTTP layer.
pub fn panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send>) -> Response> {
    CatchPanicLayer::custom(handle_panic)
}

fn handle_panic(err: Box<dyn Any + Send>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    let body = CenturionResponse {
        message: "internal server error".to_string(),
        code: 500,
        meta: Some(serde_json::json!({ "reason": reason })),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
