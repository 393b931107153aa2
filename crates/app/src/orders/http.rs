//! HTTP order service client.

use async_trait::async_trait;
use reqwest::Client;
use tiffin::orders::{Order, OrderRequest};
use tracing::debug;

use super::{OrdersClient, OrdersClientError};

/// Submits orders to `POST {base_url}/api/orders`.
#[derive(Debug, Clone)]
pub struct HttpOrdersClient {
    base_url: String,
    http: Client,
}

impl HttpOrdersClient {
    /// Create a client for the order service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }
}

#[async_trait]
impl OrdersClient for HttpOrdersClient {
    async fn submit_order(&self, request: OrderRequest) -> Result<Order, OrdersClientError> {
        let url = self.orders_url();

        debug!(%url, restaurant = %request.restaurant_id, "submitting order");

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OrdersClientError::UnexpectedResponse(format!(
                "order submission failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_url_ignores_trailing_slash() {
        assert_eq!(
            HttpOrdersClient::new("http://localhost:8080/").orders_url(),
            "http://localhost:8080/api/orders"
        );
        assert_eq!(
            HttpOrdersClient::new("https://orders.example").orders_url(),
            "https://orders.example/api/orders"
        );
    }
}
