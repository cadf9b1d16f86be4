pub mod products;

pub use products::{
    parse_store_id, CreatedProductResponse, DeletedProductResponse, ProductRequest,
    ProductResponse,
};
