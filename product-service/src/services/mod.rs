pub mod database;
pub mod metrics;

pub use database::{MongoDb, DEFAULT_DATABASE, PRODUCTS_COLLECTION};
pub use metrics::{get_metrics, init_metrics};
