use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted form of the boolean `status` flag. Only these two literals are
/// ever written to the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Active,
    Deactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Deactive => "DEACTIVE",
        }
    }
}

impl From<bool> for ProductStatus {
    fn from(active: bool) -> Self {
        if active {
            ProductStatus::Active
        } else {
            ProductStatus::Deactive
        }
    }
}

/// A document in the `products` collection.
///
/// `store_id` is the store-assigned `_id`; `id` is the caller's own number and
/// is not unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub store_id: Option<ObjectId>,
    pub id: i64,
    pub product_name: String,
    pub status: ProductStatus,
}

impl Product {
    pub fn new(id: i64, product_name: String, active: bool) -> Self {
        Self {
            store_id: None,
            id,
            product_name,
            status: ProductStatus::from(active),
        }
    }
}
