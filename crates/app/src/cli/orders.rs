use std::io;

use clap::{Args, Subcommand};
use tiffin::{
    orders::{OrderHistory, OrderStatus, OrderUuid},
    receipt::{self, format_money},
};
use tiffin_app::shopping::ShoppingSession;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, most recent first
    List,
    /// Record a status change for an order
    Status(StatusArgs),
    /// Cancel a pending or confirmed order
    Cancel(CancelArgs),
    /// Show order counts and delivered spend
    Stats,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Order id or order number
    order: String,

    /// New status (e.g. confirmed, preparing, out-for-delivery, delivered)
    status: OrderStatus,
}

#[derive(Debug, Args)]
struct CancelArgs {
    /// Order id or order number
    order: String,

    #[arg(long, default_value = "cancelled by customer")]
    reason: String,
}

pub(crate) async fn run(session: &ShoppingSession, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List => {
            receipt::write_orders(
                io::stdout().lock(),
                &session.history(),
                session.settings().currency,
            )
            .map_err(|error| format!("failed to print orders: {error}"))
        }
        OrdersSubcommand::Status(args) => {
            let id = resolve(&session.history(), &args.order)?;

            let order = session
                .update_order_status(id, args.status)
                .await
                .map_err(|error| format!("failed to update order: {error}"))?;

            println!("{}: {}", order.order_number, order.status);

            Ok(())
        }
        OrdersSubcommand::Cancel(args) => {
            let id = resolve(&session.history(), &args.order)?;

            let order = session
                .cancel_order(id, args.reason)
                .await
                .map_err(|error| format!("failed to cancel order: {error}"))?;

            println!("{}: {}", order.order_number, order.status);

            Ok(())
        }
        OrdersSubcommand::Stats => {
            let stats = session.order_stats();
            let spent = format_money(stats.total_spent, session.settings().currency)
                .map_err(|error| format!("failed to format spend: {error}"))?;

            println!("total_orders: {}", stats.total_orders);
            println!("completed_orders: {}", stats.completed_orders);
            println!("cancelled_orders: {}", stats.cancelled_orders);
            println!("total_spent: {spent}");

            Ok(())
        }
    }
}

fn resolve(history: &OrderHistory, reference: &str) -> Result<OrderUuid, String> {
    if let Ok(id) = reference.parse::<OrderUuid>() {
        return Ok(id);
    }

    let mut matching = history
        .iter()
        .filter(|order| order.order_number.eq_ignore_ascii_case(reference));

    match (matching.next(), matching.next()) {
        (Some(order), None) => Ok(order.id),
        (Some(_), Some(_)) => Err(format!(
            "order number '{reference}' matches more than one order; use the order id"
        )),
        (None, _) => Err(format!("no order matching '{reference}'")),
    }
}
