//! Test Helpers

use std::sync::Arc;

use jiff::{Zoned, civil::date, tz::TimeZone};
use tiffin::{
    cart::MenuItem,
    meals::MealType,
    orders::{DeliveryAddress, DeliveryInfo, OrderRequest, PaymentMethod},
    pricing::Totals,
    settings::Settings,
};

use crate::{
    clock::{Clock, FixedClock},
    orders::OrdersClient,
    session::SessionStore,
    shopping::ShoppingSession,
};

/// A dinner item from the default test restaurant.
pub(crate) fn menu_item(id: &str, price: u64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: id.replace('-', " "),
        price,
        restaurant_id: "r1".to_string(),
        restaurant_name: "Annapurna".to_string(),
        meal_type: MealType::Dinner,
    }
}

pub(crate) fn delivery() -> DeliveryInfo {
    DeliveryInfo {
        address: DeliveryAddress {
            street: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
            landmark: None,
            contact_name: "Asha".to_string(),
            contact_number: "9800000000".to_string(),
        },
        instructions: Some("Ring twice".to_string()),
        payment_method: PaymentMethod::Upi,
    }
}

pub(crate) fn order_request() -> OrderRequest {
    OrderRequest {
        restaurant_id: "r1".to_string(),
        restaurant_name: "Annapurna".to_string(),
        meal_type: MealType::Dinner,
        lines: Vec::new(),
        totals: Totals::default(),
        delivery: delivery(),
        scheduled_delivery: None,
    }
}

/// Local time on 2026-03-14 in UTC.
pub(crate) fn at(hour: i8, minute: i8) -> Result<Zoned, jiff::Error> {
    date(2026, 3, 14).at(hour, minute, 0, 0).to_zoned(TimeZone::UTC)
}

pub(crate) fn clock_at(hour: i8, minute: i8) -> Result<Arc<FixedClock>, jiff::Error> {
    Ok(Arc::new(FixedClock::new(at(hour, minute)?)))
}

pub(crate) fn session(
    orders: impl OrdersClient + 'static,
    store: impl SessionStore + 'static,
    clock: Arc<dyn Clock>,
) -> ShoppingSession {
    ShoppingSession::new(Settings::standard(), Arc::new(orders), Arc::new(store), clock)
}
