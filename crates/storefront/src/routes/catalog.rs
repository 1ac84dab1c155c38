//! Public catalog navigation.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::{CatalogError, CatalogService};
use crate::state::AppState;

pub(crate) fn service(state: &AppState) -> CatalogService<'_> {
    CatalogService::new(state.pool(), state.navigation(), &state.config().image_hosts)
}

/// Active categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Value>> {
    let categories = service(&state).list_categories().await?;
    Ok(Json(json!({ "success": true, "categories": categories })))
}

/// Subcategories of a category with their active submenus.
#[instrument(skip(state))]
pub async fn navigation(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let navigation = service(&state)
        .navigation(&slug)
        .await
        .map_err(|e| match e {
            CatalogError::InvalidSlug(_) => AppError::NotFound("Category not found".to_owned()),
            other => other.into(),
        })?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;

    Ok(Json(json!({
        "success": true,
        "category": navigation.category,
        "subcategories": navigation.subcategories,
    })))
}
