//! API handlers for the preview server.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::FaroError;
use crate::form::{self, FormValues};
use crate::media::svg;
use crate::options::CommonOptions;
use crate::request;
use crate::schema::{self, FieldDescriptor, QrType};

use super::state::AppState;

/// One entry of the type listing.
#[derive(Debug, Serialize)]
pub struct TypeInfo {
    pub value: &'static str,
    pub label: &'static str,
}

/// GET /api/types - list available content types.
pub async fn types() -> Json<Vec<TypeInfo>> {
    Json(
        schema::QR_TYPES
            .iter()
            .map(|ty| TypeInfo {
                value: ty.as_str(),
                label: ty.label(),
            })
            .collect(),
    )
}

/// GET /api/types/:type/fields - field descriptors for one type.
pub async fn fields(
    Path(ty): Path<String>,
) -> Result<Json<Vec<FieldDescriptor>>, (StatusCode, String)> {
    let ty = parse_type(&ty)?;
    Ok(Json(schema::fields(ty)))
}

/// Request body for generation: per-type field values plus common options.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub options: CommonOptions,
}

/// POST /api/generate/:type - validate, normalize and proxy a generation
/// request. PNG bytes on success; failures are relayed as JSON detail.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(ty): Path<String>,
    Json(req): Json<GenerateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let ty = parse_type(&ty)?;

    let mut values = FormValues::new();
    for (name, value) in &req.fields {
        values.set(name, value);
    }
    form::validate(ty, &values).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let params = request::normalize(ty, &values);
    let bytes = state
        .dispatcher
        .generate(ty, params, &req.options)
        .await
        .map_err(|e| match e {
            FaroError::Validation { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            other => (StatusCode::BAD_GATEWAY, other.to_string()),
        })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

/// POST /api/svg - wrap raster bytes into an SVG container.
pub async fn svg_wrap(body: Bytes) -> Result<impl IntoResponse, (StatusCode, String)> {
    let document = svg::wrap_raster(&body)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], document))
}

fn parse_type(name: &str) -> Result<QrType, (StatusCode, String)> {
    QrType::parse(name).ok_or((StatusCode::NOT_FOUND, format!("unknown type: {name}")))
}
