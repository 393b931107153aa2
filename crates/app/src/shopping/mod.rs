//! Shopping session.
//!
//! Owns one customer's cart and order history. Cart mutations are applied
//! synchronously under a lock that is never held across an `.await`, so they
//! may interleave with an in-flight checkout.
//!
//! Every mutation takes a revision number while it holds the state lock.
//! Saves are serialized and a snapshot older than the last one written is
//! dropped, so the store always ends up with the newest state.

use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tiffin::{
    cart::{Cart, CartError, CartLine, Customizations, LineUuid, MenuItem},
    meals::MinuteOfDay,
    orders::{
        DeliveryInfo, Order, OrderError, OrderHistory, OrderRequest, OrderStats, OrderStatus,
        OrderUuid, RequestError,
    },
    pricing::{PricingError, Totals},
    settings::Settings,
};
use tokio::{sync::Mutex as AsyncMutex, time::timeout};
use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    clock::Clock,
    orders::OrdersClient,
    session::{self, SessionSnapshot, SessionStore},
};

mod errors;

pub use errors::CheckoutError;

/// Default bound on a single order submission.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(15);

/// A single customer's cart and order history.
pub struct ShoppingSession {
    state: Mutex<SessionSnapshot>,
    revision: AtomicU64,
    saved_revision: AsyncMutex<u64>,
    in_flight: AtomicUsize,
    settings: Settings,
    orders: Arc<dyn OrdersClient>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    checkout_timeout: Duration,
}

impl ShoppingSession {
    /// Start an empty session.
    #[must_use]
    pub fn new(
        settings: Settings,
        orders: Arc<dyn OrdersClient>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionSnapshot::default()),
            revision: AtomicU64::new(0),
            saved_revision: AsyncMutex::new(0),
            in_flight: AtomicUsize::new(0),
            settings,
            orders,
            store,
            clock,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Start a session from whatever `store` holds.
    ///
    /// A store that cannot be read is logged and the session starts empty.
    pub async fn restore(
        settings: Settings,
        orders: Arc<dyn OrdersClient>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let snapshot = session::load_or_default(store.as_ref()).await;

        Self::with_snapshot(settings, orders, store, clock, snapshot)
    }

    /// Start a session holding `snapshot`, as previously loaded from `store`.
    #[must_use]
    pub fn with_snapshot(
        settings: Settings,
        orders: Arc<dyn OrdersClient>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        snapshot: SessionSnapshot,
    ) -> Self {
        let session = Self::new(settings, orders, store, clock);
        *session.lock() = snapshot;

        session
    }

    /// Bound every checkout submission by `limit`.
    #[must_use]
    pub fn with_checkout_timeout(mut self, limit: Duration) -> Self {
        self.checkout_timeout = limit;
        self
    }

    /// Settings the session prices and gates orders with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Copy of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.lock().cart.clone()
    }

    /// Copy of the order history, most recent first.
    #[must_use]
    pub fn history(&self) -> OrderHistory {
        self.lock().order_history.clone()
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().cart.item_count()
    }

    /// Whether a checkout submission is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Current time of day on the session clock.
    #[must_use]
    pub fn time_of_day(&self) -> MinuteOfDay {
        MinuteOfDay::from(self.clock.now().datetime())
    }

    /// Add `quantity` units of `item` to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the cart rules refuse the item; the cart is unchanged.
    pub async fn add_item(
        &self,
        item: &MenuItem,
        quantity: u32,
        customizations: Customizations,
    ) -> Result<LineUuid, CartError> {
        let (line, pending) =
            self.mutate(|state| state.cart.add_item(item, quantity, customizations))?;

        debug!(item = %item.id, quantity, %line, "added to cart");

        self.persist(pending).await;

        Ok(line)
    }

    /// Set the quantity of a cart line; zero removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the new quantity is refused; the cart is unchanged.
    pub async fn update_quantity(&self, line: LineUuid, quantity: u32) -> Result<(), CartError> {
        let ((), pending) = self.mutate(|state| state.cart.update_quantity(line, quantity))?;

        debug!(%line, quantity, "updated cart line");

        self.persist(pending).await;

        Ok(())
    }

    /// Remove a cart line. Unknown lines are ignored.
    pub async fn remove_item(&self, line: LineUuid) {
        let pending = {
            let mut state = self.lock();
            state.cart.remove_item(line);
            self.stage(&state)
        };

        debug!(%line, "removed cart line");

        self.persist(pending).await;
    }

    /// Empty the cart.
    pub async fn clear(&self) {
        let pending = {
            let mut state = self.lock();
            state.cart.clear();
            self.stage(&state)
        };

        debug!("cleared cart");

        self.persist(pending).await;
    }

    /// Price the cart as it stands.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if an amount overflows.
    pub fn totals(&self) -> Result<Totals, PricingError> {
        self.lock().cart.totals(&self.settings.pricing)
    }

    /// Submit the cart as an order.
    ///
    /// The submission is attempted once. On success the order is recorded at
    /// the front of the history and the submitted units leave the cart; units
    /// added while the submission was in flight stay. On any failure cart and
    /// history are left as they were.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to order.
    /// - [`CheckoutError::OrderingClosed`]: the cart's meal is outside its window.
    /// - [`CheckoutError::Pricing`]: the cart could not be priced.
    /// - [`CheckoutError::Submission`]: the order service failed.
    /// - [`CheckoutError::Timeout`]: the order service did not answer in time.
    #[instrument(skip_all, fields(units = field::Empty))]
    pub async fn checkout(&self, delivery: DeliveryInfo) -> Result<Order, CheckoutError> {
        let (request, submitted) = self.prepare(delivery)?;
        let units: u32 = submitted.iter().map(|line| line.quantity).sum();

        Span::current().record("units", units);

        let outcome = {
            let _loading = InFlight::enter(&self.in_flight);

            timeout(self.checkout_timeout, self.orders.submit_order(request)).await
        };

        let order = match outcome {
            Ok(Ok(order)) => order,
            Ok(Err(error)) => {
                warn!(%error, "order submission failed");
                return Err(CheckoutError::Submission(error));
            }
            Err(_elapsed) => {
                warn!(timeout = ?self.checkout_timeout, "order submission timed out");
                return Err(CheckoutError::Timeout(self.checkout_timeout));
            }
        };

        let pending = {
            let mut state = self.lock();
            state.order_history.record(order.clone());
            state.cart.settle(&submitted);
            self.stage(&state)
        };

        info!(
            order = %order.id,
            number = %order.order_number,
            total = order.totals.total,
            "order placed"
        );

        self.persist(pending).await;

        Ok(order)
    }

    /// Apply a status change reported by the order service.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`]: no recorded order has this id.
    /// - [`OrderError::InvalidTransition`]: the change skips or reverses the lifecycle.
    pub async fn update_order_status(
        &self,
        id: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let now = self.clock.now().timestamp();

        let (order, pending) =
            self.mutate(|state| state.order_history.update_status(id, status, now).cloned())?;

        debug!(order = %id, %status, "order status updated");

        self.persist(pending).await;

        Ok(order)
    }

    /// Cancel a pending or confirmed order.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFound`]: no recorded order has this id.
    /// - [`OrderError::InvalidTransition`]: the order can no longer be cancelled.
    pub async fn cancel_order(
        &self,
        id: OrderUuid,
        reason: impl Into<String>,
    ) -> Result<Order, OrderError> {
        let now = self.clock.now().timestamp();
        let reason = reason.into();

        let (order, pending) =
            self.mutate(|state| state.order_history.cancel(id, reason, now).cloned())?;

        debug!(order = %id, "order cancelled");

        self.persist(pending).await;

        Ok(order)
    }

    /// Order counts and delivered spend.
    #[must_use]
    pub fn order_stats(&self) -> OrderStats {
        self.lock().order_history.stats()
    }

    fn prepare(
        &self,
        delivery: DeliveryInfo,
    ) -> Result<(OrderRequest, Vec<CartLine>), CheckoutError> {
        let now = self.time_of_day();
        let state = self.lock();
        let schedule = &self.settings.schedule;

        let Some(meal_type) = state.cart.meal_type() else {
            return Err(CheckoutError::EmptyCart);
        };

        if !schedule.is_ordering_open(meal_type, now) {
            return Err(CheckoutError::OrderingClosed {
                meal_type: meal_type.clone(),
                opens_in: schedule.time_until_next_window(meal_type, now),
            });
        }

        let request =
            OrderRequest::from_cart(&state.cart, &self.settings.pricing, schedule, delivery)
                .map_err(|error| match error {
                    RequestError::EmptyCart => CheckoutError::EmptyCart,
                    RequestError::Pricing(error) => CheckoutError::Pricing(error),
                })?;

        Ok((request, state.cart.lines().to_vec()))
    }

    fn mutate<T, E>(
        &self,
        change: impl FnOnce(&mut SessionSnapshot) -> Result<T, E>,
    ) -> Result<(T, PendingSave), E> {
        let mut state = self.lock();
        let value = change(&mut state)?;

        Ok((value, self.stage(&state)))
    }

    /// Number the current state. Must be called with the state lock held.
    fn stage(&self, state: &SessionSnapshot) -> PendingSave {
        PendingSave {
            revision: self.revision.fetch_add(1, Ordering::SeqCst) + 1,
            snapshot: state.clone(),
        }
    }

    async fn persist(&self, pending: PendingSave) {
        let mut saved = self.saved_revision.lock().await;

        if pending.revision <= *saved {
            debug!(
                revision = pending.revision,
                saved = *saved,
                "newer session already saved; skipping"
            );
            return;
        }

        match self.store.save(&pending.snapshot).await {
            Ok(()) => *saved = pending.revision,
            Err(error) => warn!(%error, "failed to save session; keeping in-memory state"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ShoppingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingSession")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("in_flight", &self.in_flight)
            .field("checkout_timeout", &self.checkout_timeout)
            .finish_non_exhaustive()
    }
}

struct PendingSave {
    revision: u64,
    snapshot: SessionSnapshot,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
