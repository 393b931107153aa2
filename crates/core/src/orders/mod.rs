//! Orders
//!
//! An order is a frozen copy of a cart taken at checkout. Later cart changes
//! never reach it; only its status moves afterwards.

use jiff::{Timestamp, civil};
use serde::{Deserialize, Serialize};

use crate::{
    cart::{Cart, CartLine, Customizations},
    meals::{MealSchedule, MealType, TimeSpan},
    pricing::{PricingPolicy, Totals},
    uuids::TypedUuid,
};

pub mod errors;
pub mod history;
pub mod status;

pub use errors::{OrderError, ParseStatusError, RequestError};
pub use history::{OrderHistory, OrderStats};
pub use status::OrderStatus;

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// How the customer pays on delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
}

/// Delivery Address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub contact_name: String,
    pub contact_number: String,
}

/// Where and how an order is delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub address: DeliveryAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Copy of a cart line as it was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    #[serde(default)]
    pub customizations: Customizations,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            menu_item_id: line.menu_item_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            customizations: line.customizations.clone(),
        }
    }
}

/// Order as submitted, before the order service assigns its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub meal_type: MealType,
    pub lines: Vec<OrderLine>,
    pub totals: Totals,
    pub delivery: DeliveryInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_delivery: Option<TimeSpan>,
}

impl OrderRequest {
    /// Snapshot `cart` into a request, pricing it under `policy`.
    ///
    /// # Errors
    ///
    /// - [`RequestError::EmptyCart`]: the cart has no lines.
    /// - [`RequestError::Pricing`]: the cart could not be priced.
    pub fn from_cart(
        cart: &Cart,
        policy: &PricingPolicy,
        schedule: &MealSchedule,
        delivery: DeliveryInfo,
    ) -> Result<Self, RequestError> {
        let Some(first) = cart.lines().first() else {
            return Err(RequestError::EmptyCart);
        };

        let totals = cart.totals(policy)?;

        Ok(Self {
            restaurant_id: first.restaurant_id.clone(),
            restaurant_name: first.restaurant_name.clone(),
            meal_type: first.meal_type.clone(),
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            totals,
            delivery,
            scheduled_delivery: schedule.delivery_window(&first.meal_type),
        })
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderUuid,
    pub order_number: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub meal_type: MealType,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub totals: Totals,
    pub delivery: DeliveryInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_delivery: Option<TimeSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Accept a request as a new pending order.
    #[must_use]
    pub fn accept(
        request: OrderRequest,
        id: OrderUuid,
        order_number: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            order_number,
            restaurant_id: request.restaurant_id,
            restaurant_name: request.restaurant_name,
            meal_type: request.meal_type,
            lines: request.lines,
            status: OrderStatus::Pending,
            totals: request.totals,
            delivery: request.delivery,
            scheduled_delivery: request.scheduled_delivery,
            cancellation_reason: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// Human-readable order number, `ORD-YYYYMMDD-NNNN`.
///
/// Only the last four digits of `sequence` are kept.
#[must_use]
pub fn order_number(date: civil::Date, sequence: u16) -> String {
    format!(
        "ORD-{:04}{:02}{:02}-{:04}",
        date.year(),
        date.month(),
        date.day(),
        sequence % 10_000
    )
}
