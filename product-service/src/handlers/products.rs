use crate::dtos::{
    parse_store_id, CreatedProductResponse, DeletedProductResponse, ProductRequest,
    ProductResponse,
};
use crate::models::Product;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use service_core::error::AppError;
use service_core::response::Envelope;

#[tracing::instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Envelope<CreatedProductResponse>, AppError> {
    let Json(request) = payload?;
    let product = Product::try_from(request)?;

    let store_id = state.db.insert_product(&product).await?;

    tracing::info!(
        store_id = %store_id,
        product_id = product.id,
        status = product.status.as_str(),
        "Product created"
    );

    Ok(Envelope::ok(
        "Product created successfully",
        CreatedProductResponse {
            inserted_id: store_id.to_hex(),
        },
    ))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Envelope<ProductResponse>, AppError> {
    let store_id = parse_store_id(&product_id)?;
    let Json(request) = payload?;
    let product = Product::try_from(request)?;

    let updated = state
        .db
        .update_product(store_id, &product)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    Ok(Envelope::ok(
        "Product edited successfully",
        ProductResponse::from(updated),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Envelope<DeletedProductResponse>, AppError> {
    let store_id = parse_store_id(&product_id)?;

    let deleted_count = state.db.delete_product(store_id).await?;
    if deleted_count < 1 {
        return Err(AppError::NotFound(anyhow::anyhow!("Product not found")));
    }

    Ok(Envelope::ok(
        "Product deleted successfully",
        DeletedProductResponse { deleted_count },
    ))
}

#[tracing::instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Envelope<ProductResponse>, AppError> {
    let store_id = parse_store_id(&product_id)?;

    let product = state
        .db
        .find_product(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product not found")))?;

    Ok(Envelope::ok("Product found", ProductResponse::from(product)))
}
