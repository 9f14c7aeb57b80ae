use std::fmt;

use thiserror::Error;

use crate::api::ApiError;
use crate::models::ProductId;

/// Message shown when a requested quantity is not available.
pub const STOCK_EXCEEDED_MESSAGE: &str = "Quantidade solicitada fora de estoque";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl CartOperation {
    /// Generic failure message shown for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "Erro na adição do produto",
            CartOperation::Remove => "Erro na remoção do produto",
            CartOperation::Update => "Erro na alteração de quantidade do produto",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::Update => "update",
        };
        f.write_str(name)
    }
}

/// Coarse failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    StockExceeded,
    Transient,
}

/// Why a cart operation was rejected. The cart is unchanged in every case.
#[derive(Error, Debug)]
pub enum CartError {
    #[error("{operation} failed: product {product_id} not found in catalog")]
    ProductNotFound {
        operation: CartOperation,
        product_id: ProductId,
    },

    #[error("{operation} failed: product {product_id} is not in the cart")]
    NotInCart {
        operation: CartOperation,
        product_id: ProductId,
    },

    #[error("{operation} failed: requested {requested} of product {product_id}, {available} in stock")]
    StockExceeded {
        operation: CartOperation,
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    #[error("{operation} failed for product {product_id}: {source}")]
    Transient {
        operation: CartOperation,
        product_id: ProductId,
        #[source]
        source: ApiError,
    },
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::ProductNotFound { .. } | CartError::NotInCart { .. } => ErrorKind::NotFound,
            CartError::StockExceeded { .. } => ErrorKind::StockExceeded,
            CartError::Transient { .. } => ErrorKind::Transient,
        }
    }

    pub fn operation(&self) -> CartOperation {
        match self {
            CartError::ProductNotFound { operation, .. }
            | CartError::NotInCart { operation, .. }
            | CartError::StockExceeded { operation, .. }
            | CartError::Transient { operation, .. } => *operation,
        }
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            CartError::ProductNotFound { product_id, .. }
            | CartError::NotInCart { product_id, .. }
            | CartError::StockExceeded { product_id, .. }
            | CartError::Transient { product_id, .. } => *product_id,
        }
    }

    /// Text to show the shopper.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::StockExceeded => STOCK_EXCEEDED_MESSAGE,
            ErrorKind::NotFound | ErrorKind::Transient => self.operation().failure_message(),
        }
    }
}
