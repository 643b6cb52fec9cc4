//! Request validation routes
//!
//! `POST /validate/:schema` runs the body through the named schema:
//! - valid: `200 {"data": <sanitised value>}`
//! - invalid: `400 {"errors": [<message>, ...]}`
//! - unknown schema: `404`
//!
//! `GET /schemas` lists the registered schema names.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{HttpError, HttpResult};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::SchemaLoader;
use crate::validator::{validate_with, ValidateOptions};

/// Shared, read-only state of the gate
pub struct GateState {
    pub loader: Arc<SchemaLoader>,
    pub metrics: Arc<MetricsRegistry>,
    pub options: ValidateOptions,
}

/// Single payload response
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Create validation routes
pub fn validate_routes(state: Arc<GateState>) -> Router {
    Router::new()
        .route("/schemas", get(list_schemas_handler))
        .route("/validate/:schema", post(validate_handler))
        .with_state(state)
}

async fn list_schemas_handler(State(state): State<Arc<GateState>>) -> Json<DataResponse<Vec<String>>> {
    let names = state.loader.names().map(str::to_string).collect();
    Json(DataResponse { data: names })
}

async fn validate_handler(
    State(state): State<Arc<GateState>>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> HttpResult<Json<DataResponse<Value>>> {
    let schema = state
        .loader
        .get(&name)
        .ok_or_else(|| HttpError::UnknownSchema(name.clone()))?;

    match validate_with(&schema, &body, &state.options).into_result() {
        Ok(value) => {
            state.metrics.increment_validated();
            log_event_with_fields(Event::RequestValidated, &[("schema", &name)]);
            Ok(Json(DataResponse {
                data: Value::Object(value),
            }))
        }
        Err(errors) => {
            state.metrics.record_rejected(errors.len());
            log_event_with_fields(
                Event::RequestRejected,
                &[("errors", &errors.len().to_string()), ("schema", &name)],
            );
            Err(HttpError::Rejected(errors))
        }
    }
}
