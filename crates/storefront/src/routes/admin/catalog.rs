//! Catalog management. Writes clear the navigation cache.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use flipzokart_core::{CategoryId, SubcategoryId, SubmenuId};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::routes::catalog::service;
use crate::services::catalog::{CategoryInput, SubcategoryInput, SubmenuInput, SubmenuPatch};
use crate::state::AppState;

use super::json_body;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub banner_url: Option<String>,
    pub mobile_banner_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryBody {
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuBody {
    pub subcategory_id: SubcategoryId,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmenuPatchBody {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub icon_url: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub link: Option<String>,
}

#[instrument(skip(state, _admin, body))]
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    body: std::result::Result<Json<CategoryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let body = json_body(body)?;
    let category = service(&state)
        .create_category(CategoryInput {
            name: body.name,
            slug: body.slug,
            banner_url: body.banner_url,
            mobile_banner_url: body.mobile_banner_url,
        })
        .await?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "category": category })),
    ))
}

#[instrument(skip(state, _admin, body))]
pub async fn create_subcategory(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    body: std::result::Result<Json<SubcategoryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let body = json_body(body)?;
    let subcategory = service(&state)
        .create_subcategory(SubcategoryInput {
            category_id: body.category_id,
            name: body.name,
            slug: body.slug,
            icon_url: body.icon_url,
            position: body.position,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "subcategory": subcategory })),
    ))
}

#[instrument(skip(state, _admin, body))]
pub async fn create_submenu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    body: std::result::Result<Json<SubmenuBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let body = json_body(body)?;
    let submenu = service(&state)
        .create_submenu(SubmenuInput {
            subcategory_id: body.subcategory_id,
            name: body.name,
            slug: body.slug,
            icon_url: body.icon_url,
            position: body.position,
            is_active: body.is_active,
            link: body.link,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "submenu": submenu })),
    ))
}

#[instrument(skip(state, _admin, body))]
pub async fn update_submenu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<SubmenuId>,
    body: std::result::Result<Json<SubmenuPatchBody>, JsonRejection>,
) -> Result<Json<Value>> {
    let body = json_body(body)?;
    let submenu = service(&state)
        .update_submenu(
            id,
            SubmenuPatch {
                name: body.name,
                slug: body.slug,
                icon_url: body.icon_url,
                position: body.position,
                is_active: body.is_active,
                link: body.link,
            },
        )
        .await?;

    Ok(Json(json!({ "success": true, "submenu": submenu })))
}

#[instrument(skip(state, _admin))]
pub async fn delete_submenu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<SubmenuId>,
) -> Result<Json<Value>> {
    service(&state).delete_submenu(id).await?;
    Ok(Json(json!({ "success": true })))
}
