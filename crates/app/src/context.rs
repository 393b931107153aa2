//! App Context

use std::sync::Arc;

use thiserror::Error;
use tiffin::settings::{Settings, SettingsError};
use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    config::AppConfig,
    orders::{HttpOrdersClient, LocalOrdersClient, OrdersClient},
    session::{self, JsonFileSessionStore, SessionStore},
    shopping::ShoppingSession,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load settings")]
    Settings(#[from] SettingsError),
}

#[derive(Debug)]
pub struct AppContext {
    pub session: ShoppingSession,
}

impl AppContext {
    /// Build the shopping session described by `config`, restoring any saved state.
    ///
    /// Offline order numbers continue from the saved history.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings file cannot be loaded.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let settings = match &config.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::standard(),
        };

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store: Arc<dyn SessionStore> =
            Arc::new(JsonFileSessionStore::new(config.session_file.clone()));
        let snapshot = session::load_or_default(store.as_ref()).await;

        let orders: Arc<dyn OrdersClient> = match &config.orders_url {
            Some(url) => Arc::new(HttpOrdersClient::new(url.as_str())),
            None => Arc::new(LocalOrdersClient::resuming(
                clock.clone(),
                &snapshot.order_history,
            )),
        };

        debug!(
            session_file = %config.session_file.display(),
            remote = config.orders_url.is_some(),
            "building app context"
        );

        let session = ShoppingSession::with_snapshot(settings, orders, store, clock, snapshot)
            .with_checkout_timeout(config.checkout_timeout());

        Ok(Self { session })
    }
}
