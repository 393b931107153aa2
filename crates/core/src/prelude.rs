//! Tiffin prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartLine, Customization, Customizations, LineUuid, MAX_CART_ITEMS,
        MenuItem,
    },
    meals::{
        Countdown, MealSchedule, MealType, MealWindow, MinuteOfDay, ScheduleError, TimeSpan,
        WindowStatus,
    },
    orders::{
        DeliveryAddress, DeliveryInfo, Order, OrderError, OrderHistory, OrderLine, OrderRequest,
        OrderStats, OrderStatus, OrderUuid, PaymentMethod, RequestError, order_number,
    },
    pricing::{PricingError, PricingPolicy, Totals},
    receipt::ReceiptError,
    settings::{Settings, SettingsError},
};
