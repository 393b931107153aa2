//! Cart errors.

use thiserror::Error;

use crate::{cart::LineUuid, meals::MealType};

/// Reasons a cart mutation was refused. The cart is unchanged whenever one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart holds {current} items; adding {requested} would exceed the limit of {max}")]
    LimitExceeded { current: u32, requested: u32, max: u32 },

    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error("cart holds items from restaurant {expected}, not {found}")]
    RestaurantMismatch { expected: String, found: String },

    #[error("cart holds {expected} items, not {found}")]
    MealMismatch { expected: MealType, found: MealType },

    #[error("cart line {0} not found")]
    LineNotFound(LineUuid),

    /// A stored line repeats an id, or an item and options, already in the cart.
    #[error("cart line {0} duplicates another line")]
    DuplicateLine(LineUuid),
}
