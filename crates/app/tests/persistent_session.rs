use std::sync::Arc;

use async_trait::async_trait;
use jiff::{civil::date, tz::TimeZone};
use testresult::TestResult;
use tiffin::prelude::*;
use tiffin_app::{
    clock::{Clock, FixedClock},
    orders::{LocalOrdersClient, OrdersClient, OrdersClientError},
    session::{JsonFileSessionStore, SessionStore},
    shopping::{CheckoutError, ShoppingSession},
};
use tokio::sync::Notify;

fn thali() -> MenuItem {
    MenuItem {
        id: "veg-thali".to_string(),
        name: "Veg Thali".to_string(),
        price: 90_00,
        restaurant_id: "r1".to_string(),
        restaurant_name: "Annapurna".to_string(),
        meal_type: MealType::Lunch,
    }
}

fn delivery() -> DeliveryInfo {
    DeliveryInfo {
        address: DeliveryAddress {
            street: "4 Residency Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560025".to_string(),
            landmark: Some("Opposite the park".to_string()),
            contact_name: "Ravi".to_string(),
            contact_number: "9811111111".to_string(),
        },
        instructions: None,
        payment_method: PaymentMethod::Cash,
    }
}

async fn open_session(
    store: Arc<JsonFileSessionStore>,
    clock: Arc<FixedClock>,
) -> ShoppingSession {
    let clock: Arc<dyn Clock> = clock;

    ShoppingSession::restore(
        Settings::standard(),
        Arc::new(LocalOrdersClient::starting_at(clock.clone(), 7)),
        store,
        clock,
    )
    .await
}

#[tokio::test]
async fn placed_orders_survive_a_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileSessionStore::new(dir.path().join("session.json")));
    let morning = date(2026, 3, 14).at(9, 30, 0, 0).to_zoned(TimeZone::UTC)?;
    let clock = Arc::new(FixedClock::new(morning));

    let session = open_session(store.clone(), clock.clone()).await;

    session.add_item(&thali(), 2, Customizations::new()).await?;

    let order = session.checkout(delivery()).await?;

    assert_eq!(order.order_number, "ORD-20260314-0007");
    assert_eq!(order.totals.total, 219_00);
    assert_eq!(order.scheduled_delivery, Some("13:15-14:00".parse()?));

    drop(session);

    let reopened = open_session(store.clone(), clock).await;

    assert!(reopened.cart().is_empty());
    assert_eq!(reopened.history().get(order.id), Some(&order));

    reopened
        .update_order_status(order.id, OrderStatus::Confirmed)
        .await?;

    let saved = store.load().await?;

    assert_eq!(
        saved.order_history.get(order.id).map(|order| order.status),
        Some(OrderStatus::Confirmed)
    );

    Ok(())
}

#[tokio::test]
async fn cart_is_kept_when_the_window_is_closed() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileSessionStore::new(dir.path().join("nested/session.json")));
    let evening = date(2026, 3, 14).at(20, 0, 0, 0).to_zoned(TimeZone::UTC)?;
    let clock = Arc::new(FixedClock::new(evening));

    let session = open_session(store.clone(), clock.clone()).await;

    session.add_item(&thali(), 1, Customizations::new()).await?;

    let result = session.checkout(delivery()).await;

    assert!(matches!(
        result,
        Err(CheckoutError::OrderingClosed { meal_type: MealType::Lunch, .. })
    ));

    let reopened = open_session(store, clock).await;

    assert_eq!(reopened.item_count(), 1);
    assert!(reopened.history().is_empty());

    Ok(())
}

/// Accepts orders locally, but only once released.
struct HeldOrdersClient {
    release: Arc<Notify>,
    inner: LocalOrdersClient,
}

#[async_trait]
impl OrdersClient for HeldOrdersClient {
    async fn submit_order(&self, request: OrderRequest) -> Result<Order, OrdersClientError> {
        self.release.notified().await;

        self.inner.submit_order(request).await
    }
}

#[tokio::test]
async fn line_added_mid_checkout_is_saved_with_the_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileSessionStore::new(dir.path().join("session.json")));
    let morning = date(2026, 3, 14).at(9, 30, 0, 0).to_zoned(TimeZone::UTC)?;
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(morning));
    let release = Arc::new(Notify::new());

    let session = ShoppingSession::new(
        Settings::standard(),
        Arc::new(HeldOrdersClient {
            release: release.clone(),
            inner: LocalOrdersClient::starting_at(clock.clone(), 1),
        }),
        store.clone(),
        clock,
    );

    session.add_item(&thali(), 1, Customizations::new()).await?;

    let mut curd_rice = thali();
    curd_rice.id = "curd-rice".to_string();
    curd_rice.name = "Curd Rice".to_string();

    let (placed, added) = tokio::join!(session.checkout(delivery()), async {
        let added = session.add_item(&curd_rice, 1, Customizations::new()).await;

        release.notify_one();

        added
    });

    let order = placed?;
    let curd_rice_line = added?;
    let saved = store.load().await?;

    assert_eq!(saved.order_history.get(order.id), Some(&order));
    assert_eq!(saved.cart.lines().len(), 1);
    assert!(saved.cart.line(curd_rice_line).is_some());

    Ok(())
}
