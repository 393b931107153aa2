//! Checkout errors.

use std::time::Duration;

use thiserror::Error;
use tiffin::{
    meals::{Countdown, MealType},
    pricing::PricingError,
};

use crate::orders::OrdersClientError;

/// Reasons a checkout did not produce an order. Cart and history are unchanged.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart's meal is outside its ordering window.
    #[error("{meal_type} ordering is closed")]
    OrderingClosed {
        meal_type: MealType,
        opens_in: Option<Countdown>,
    },

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order service refused or failed the submission.
    #[error("order submission failed")]
    Submission(#[source] OrdersClientError),

    /// The order service did not answer in time. The order may still have been placed.
    #[error("order submission timed out after {0:?}")]
    Timeout(Duration),
}
