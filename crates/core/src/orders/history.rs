//! Order History

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::orders::{Order, OrderError, OrderStatus, OrderUuid};

/// Orders placed in a session, most recent first. Orders are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

/// Aggregate counts over an order history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub completed_orders: usize,
    pub cancelled_orders: usize,
    /// Sum of delivered order totals, in minor units.
    pub total_spent: u64,
}

impl OrderHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly placed order at the front.
    pub fn record(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get(&self, id: OrderUuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Orders, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Number of recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no order has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Move an order to `status`, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`]: no order has this id.
    /// - [`OrderError::InvalidTransition`]: the order cannot move to `status`.
    pub fn update_status(
        &mut self,
        id: OrderUuid,
        status: OrderStatus,
        now: Timestamp,
    ) -> Result<&Order, OrderError> {
        let order = self.find_mut(id)?;

        order.status = order.status.transition_to(status)?;
        order.updated_at = now;

        Ok(order)
    }

    /// Cancel an order, keeping the reason given.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`]: no order has this id.
    /// - [`OrderError::InvalidTransition`]: the order is past the point of cancellation.
    pub fn cancel(
        &mut self,
        id: OrderUuid,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Result<&Order, OrderError> {
        let order = self.find_mut(id)?;

        order.status = order.status.transition_to(OrderStatus::Cancelled)?;
        order.cancellation_reason = Some(reason.into());
        order.updated_at = now;

        Ok(order)
    }

    /// Count orders by outcome and sum what was spent on delivered ones.
    #[must_use]
    pub fn stats(&self) -> OrderStats {
        self.orders
            .iter()
            .fold(
                OrderStats {
                    total_orders: self.orders.len(),
                    ..OrderStats::default()
                },
                |mut stats, order| {
                    match order.status {
                        OrderStatus::Delivered => {
                            stats.completed_orders += 1;
                            stats.total_spent = stats.total_spent.saturating_add(order.totals.total);
                        }
                        OrderStatus::Cancelled => stats.cancelled_orders += 1,
                        _ => {}
                    }

                    stats
                },
            )
    }

    fn find_mut(&mut self, id: OrderUuid) -> Result<&mut Order, OrderError> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound { id })
    }
}

impl<'a> IntoIterator for &'a OrderHistory {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
