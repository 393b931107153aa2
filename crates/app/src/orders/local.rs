//! Offline order client.

use std::sync::{
    Arc,
    atomic::{AtomicU16, Ordering},
};

use async_trait::async_trait;
use rand::Rng;
use tiffin::orders::{Order, OrderHistory, OrderRequest, OrderUuid, order_number};
use tracing::debug;

use crate::clock::Clock;

use super::{OrdersClient, OrdersClientError};

/// Number of distinct sequence values in an order number.
const SEQUENCES: u16 = 10_000;

/// Accepts every order locally, numbering them from a random starting point
/// or from just past the orders already on record.
pub struct LocalOrdersClient {
    clock: Arc<dyn Clock>,
    sequence: AtomicU16,
}

impl LocalOrdersClient {
    /// Create a client whose numbering starts at a random sequence.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::starting_at(clock, rand::thread_rng().gen_range(1..SEQUENCES))
    }

    /// Create a client that continues numbering after the highest sequence in `history`.
    ///
    /// Falls back to a random start when `history` holds no local order numbers.
    #[must_use]
    pub fn resuming(clock: Arc<dyn Clock>, history: &OrderHistory) -> Self {
        let last = history
            .iter()
            .filter_map(|order| order.order_number.rsplit_once('-'))
            .filter_map(|(_, sequence)| sequence.parse::<u16>().ok())
            .max();

        match last {
            Some(sequence) => Self::starting_at(clock, (sequence % SEQUENCES + 1) % SEQUENCES),
            None => Self::new(clock),
        }
    }

    /// Create a client whose first order uses `sequence`.
    #[must_use]
    pub fn starting_at(clock: Arc<dyn Clock>, sequence: u16) -> Self {
        Self {
            clock,
            sequence: AtomicU16::new(sequence % SEQUENCES),
        }
    }
}

impl std::fmt::Debug for LocalOrdersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalOrdersClient")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersClient for LocalOrdersClient {
    async fn submit_order(&self, request: OrderRequest) -> Result<Order, OrdersClientError> {
        let now = self.clock.now();
        let sequence = self
            .sequence
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |sequence| {
                Some((sequence + 1) % SEQUENCES)
            })
            .unwrap_or_else(|sequence| sequence);
        let number = order_number(now.date(), sequence);

        debug!(order_number = %number, "accepting order locally");

        Ok(Order::accept(
            request,
            OrderUuid::now_v7(),
            number,
            now.timestamp(),
        ))
    }
}
