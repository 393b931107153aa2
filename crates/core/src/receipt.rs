//! Receipt
//!
//! Plain-text tables for carts, order history and meal windows.

use std::{io, ops::Range};

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine, MenuItem},
    meals::{MealSchedule, MinuteOfDay, WindowStatus},
    orders::OrderHistory,
    pricing::{PricingError, PricingPolicy},
};

/// Errors that can occur while rendering a table.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// An amount is too large to display.
    #[error("amount {0} is too large to display")]
    Amount(u64),

    /// Writing to the output failed.
    #[error("IO error")]
    IO,
}

/// Format a minor-unit amount in `currency`.
///
/// # Errors
///
/// Returns [`ReceiptError::Amount`] if the amount does not fit in a signed 64-bit value.
pub fn format_money(amount: u64, currency: &'static Currency) -> Result<String, ReceiptError> {
    let minor = i64::try_from(amount).map_err(|_err| ReceiptError::Amount(amount))?;

    Ok(Money::from_minor(minor, currency).to_string())
}

/// Write the cart lines followed by the derived totals.
///
/// # Errors
///
/// Returns an error if the cart cannot be priced or the output cannot be written.
pub fn write_cart(
    mut out: impl io::Write,
    cart: &Cart,
    policy: &PricingPolicy,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty.").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Options", "Qty", "Unit Price", "Line Total"]);

    for (idx, line) in cart.lines().iter().enumerate() {
        let unit = line.unit_total().ok_or(PricingError::Overflow)?;
        let total = line.line_total().ok_or(PricingError::Overflow)?;

        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.name.clone(),
            options(line),
            line.quantity.to_string(),
            format_money(unit, currency)?,
            format_money(total, currency)?,
        ]);
    }

    write_table(&mut out, builder, Columns::new(3..6))?;

    let totals = cart.totals(policy)?;

    if let Some((_, restaurant)) = cart.restaurant() {
        writeln!(out, " Restaurant: {restaurant}").map_err(|_err| ReceiptError::IO)?;
    }

    for (label, amount) in [
        ("Subtotal", totals.subtotal),
        ("Delivery", totals.delivery_fee),
        ("Tax", totals.tax),
        ("Total", totals.total),
    ] {
        writeln!(out, " {:<10} {:>12}", format!("{label}:"), format_money(amount, currency)?)
            .map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

/// Write the order history, most recent first.
///
/// # Errors
///
/// Returns an error if an amount cannot be displayed or the output cannot be written.
pub fn write_orders(
    mut out: impl io::Write,
    history: &OrderHistory,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if history.is_empty() {
        return writeln!(out, "No orders yet.").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Id", "Placed", "Meal", "Restaurant", "Status", "Items", "Total"]);

    for order in history {
        builder.push_record([
            order.order_number.clone(),
            order.id.to_string(),
            order.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
            order.meal_type.to_string(),
            order.restaurant_name.clone(),
            order.status.to_string(),
            order.item_count().to_string(),
            format_money(order.totals.total, currency)?,
        ]);
    }

    write_table(&mut out, builder, Columns::new(6..8))
}

/// Write every meal window with its state at `now`.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_windows(
    mut out: impl io::Write,
    schedule: &MealSchedule,
    now: MinuteOfDay,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Meal", "Ordering", "Delivery", "Status"]);

    for window in schedule.windows() {
        let status = match schedule.status(&window.meal_type, now) {
            WindowStatus::Open { closes_in } => format!("open, closes in {closes_in}"),
            WindowStatus::Closed { opens_in } => format!("closed, opens in {opens_in}"),
            WindowStatus::Unavailable => "unavailable".to_string(),
        };

        builder.push_record([
            window.meal_type.to_string(),
            window.ordering.to_string(),
            window.delivery.to_string(),
            status,
        ]);
    }

    write_table(&mut out, builder, Columns::new(1..3))
}

/// Write the menu items that can be added to the cart.
///
/// # Errors
///
/// Returns an error if a price cannot be displayed or the output cannot be written.
pub fn write_menu(
    mut out: impl io::Write,
    menu: &[MenuItem],
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if menu.is_empty() {
        return writeln!(out, "Menu is empty.").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Meal", "Restaurant", "Price"]);

    for item in menu {
        builder.push_record([
            item.id.clone(),
            item.name.clone(),
            item.meal_type.to_string(),
            item.restaurant_name.clone(),
            format_money(item.price, currency)?,
        ]);
    }

    write_table(&mut out, builder, Columns::new(4..5))
}

fn options(line: &CartLine) -> String {
    line.customizations
        .iter()
        .map(|option| format!("{}: {}", option.option_name, option.selected_choice))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Columns<Range<usize>>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')));

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(right_aligned, Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)
}
