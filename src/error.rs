/// Error types for the cart store and application startup
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("product {0} does not exist")]
    ProductNotFound(i64),

    #[error("product {0} is not in the cart")]
    NotInCart(i64),

    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    OutOfStock {
        product_id: i64,
        requested: u32,
        available: u32,
    },

    #[error("could not determine user data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, CartError>;
