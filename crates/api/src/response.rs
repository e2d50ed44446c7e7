//! Shared response envelope types for API handlers.
//!
//! Responses use a `{ "data": ... }` envelope. Use [`DataResponse`] instead
//! of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: reply }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
