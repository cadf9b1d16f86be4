use crate::models::{Product, ProductStatus};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::{Validate, ValidationError};

/// Body of `POST /product` and `PUT /product/:id`.
///
/// `id` and `product_name` are optional at the serde layer so a missing field
/// surfaces as a validation error instead of a JSON rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_product_id"))]
pub struct ProductRequest {
    #[validate(required(message = "id is required"))]
    pub id: Option<i64>,
    #[validate(
        required(message = "product_name is required"),
        length(min = 1, message = "product_name cannot be empty")
    )]
    pub product_name: Option<String>,
    #[serde(default)]
    pub status: bool,
}

// Zero is the "unset" value for a caller-supplied id.
fn validate_product_id(request: &ProductRequest) -> Result<(), ValidationError> {
    if request.id == Some(0) {
        let mut err = ValidationError::new("id_required");
        err.message = Some("id must be non-zero".into());
        return Err(err);
    }
    Ok(())
}

impl TryFrom<ProductRequest> for Product {
    type Error = AppError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        match (request.id, request.product_name) {
            (Some(id), Some(product_name)) => Ok(Product::new(id, product_name, request.status)),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "id and product_name are required"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub store_id: String,
    pub id: i64,
    pub product_name: String,
    pub status: ProductStatus,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            store_id: product
                .store_id
                .map(|oid| oid.to_hex())
                .unwrap_or_default(),
            id: product.id,
            product_name: product.product_name,
            status: product.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedProductResponse {
    pub inserted_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeletedProductResponse {
    pub deleted_count: u64,
}

/// Parses a path segment as a store identifier (24-char hex ObjectId).
pub fn parse_store_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Invalid product id '{}': {}", raw, e))
    })
}
