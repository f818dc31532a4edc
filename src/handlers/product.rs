// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, instrument};

use crate::dtos::product::{apply_update, parse_create, ProductResponse};
use crate::error::AppError;
use crate::repo;
use crate::state::AppState;

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    match repo::product::list_all(&state.db_pool).await {
        Ok(products) => {
            let response = products.into_iter().map(ProductResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/{id} - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = repo::product::get_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let new = parse_create(&body)?;

    let product = repo::product::insert(&state.db_pool, &new).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/{id} - Overwrite the fields present in the body
#[instrument(skip(state, body), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ProductResponse>, AppError> {
    let mut product = repo::product::get_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    // The update path takes raw body fields without the create path's
    // validation; an uncoercible value surfaces as a server error.
    apply_update(&mut product, &body).map_err(AppError::internal)?;

    let product = repo::product::update(&state.db_pool, &product)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !repo::product::delete(&state.db_pool, id).await? {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
