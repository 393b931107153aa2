//! Order submission.
//!
//! Checkout hands an [`OrderRequest`] to an [`OrdersClient`], which returns the
//! order as recorded by whoever assigns order identity.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tiffin::orders::{Order, OrderRequest};

mod http;
mod local;

pub use http::HttpOrdersClient;
pub use local::LocalOrdersClient;

/// Errors raised while submitting an order.
#[derive(Debug, Error)]
pub enum OrdersClientError {
    /// An HTTP transport or serialization error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The order service responded with something other than an order.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait OrdersClient: Send + Sync {
    /// Submit an order request, returning the accepted order.
    ///
    /// This is called at most once per checkout and never retried.
    async fn submit_order(&self, request: OrderRequest) -> Result<Order, OrdersClientError>;
}
