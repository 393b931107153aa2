//! Order errors.

use thiserror::Error;

use crate::{
    orders::{OrderStatus, OrderUuid},
    pricing::PricingError,
};

/// Errors raised while updating recorded orders.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// No order in the history has this id.
    #[error("order {id} not found")]
    NotFound { id: OrderUuid },

    /// The status change is not allowed from the current status.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

/// Errors raised while turning a cart into an order request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Text that names no order status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);
