use crate::models::Product;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::future::Future;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_DATABASE: &str = "golangAPI";
pub const PRODUCTS_COLLECTION: &str = "products";

/// MongoDB access for products. Every store call is bounded by `op_timeout`.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    op_timeout: Duration,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str, op_timeout: Duration) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            op_timeout,
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for product-service");

        // Caller-supplied ids may repeat, so the index is not unique.
        let product_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_id_lookup".to_string())
                    .build(),
            )
            .build();

        self.run("create_index", self.products().create_index(product_id_index, None))
            .await?;
        tracing::info!("Created index on products.id");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.run(
            "ping",
            self.client
                .database("admin")
                .run_command(doc! { "ping": 1 }, None),
        )
        .await
        .map_err(|e| {
            tracing::error!("MongoDB health check failed: {}", e);
            e
        })?;
        Ok(())
    }

    /// Inserts a new product and returns the store-assigned `_id`.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn insert_product(&self, product: &Product) -> Result<ObjectId, AppError> {
        let result = self
            .run("insert_product", self.products().insert_one(product, None))
            .await?;

        let store_id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Store returned a non-ObjectId identifier: {}",
                result.inserted_id
            ))
        })?;

        info!(store_id = %store_id, "Product inserted");
        Ok(store_id)
    }

    /// Overwrites `id`, `product_name` and `status` of the matching document
    /// and returns it as stored after the write, or `None` if nothing matched.
    #[instrument(skip(self, product), fields(store_id = %store_id))]
    pub async fn update_product(
        &self,
        store_id: ObjectId,
        product: &Product,
    ) -> Result<Option<Product>, AppError> {
        let update = doc! {
            "$set": {
                "id": product.id,
                "product_name": product.product_name.as_str(),
                "status": product.status.as_str(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .run(
                "update_product",
                self.products()
                    .find_one_and_update(doc! { "_id": store_id }, update, options),
            )
            .await?;

        info!(matched = updated.is_some(), "Product update finished");
        Ok(updated)
    }

    /// Removes the matching document and returns how many were deleted.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn delete_product(&self, store_id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .run(
                "delete_product",
                self.products().delete_one(doc! { "_id": store_id }, None),
            )
            .await?;

        info!(deleted_count = result.deleted_count, "Product delete finished");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn find_product(&self, store_id: ObjectId) -> Result<Option<Product>, AppError> {
        self.run(
            "find_product",
            self.products().find_one(doc! { "_id": store_id }, None),
        )
        .await
    }

    async fn run<T, F>(&self, operation: &str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.op_timeout, call).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!(operation = %operation, "MongoDB operation failed: {}", e);
                AppError::from(e)
            }),
            Err(_) => Err(AppError::Timeout(format!(
                "{} exceeded {}s",
                operation,
                self.op_timeout.as_secs()
            ))),
        }
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
