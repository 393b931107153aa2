//! Tiffin
//!
//! Tiffin is the ordering core of a meal-delivery service: meal ordering
//! windows, a capped single-restaurant cart, derived pricing and an order
//! history with an enforced status lifecycle.

pub mod cart;
pub mod meals;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod settings;
pub mod uuids;
