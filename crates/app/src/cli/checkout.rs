use clap::{Args, ValueEnum};
use tiffin::{
    orders::{DeliveryAddress, DeliveryInfo, PaymentMethod},
    receipt::format_money,
};
use tiffin_app::shopping::{CheckoutError, ShoppingSession};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Payment {
    Cash,
    Card,
    Upi,
}

impl From<Payment> for PaymentMethod {
    fn from(value: Payment) -> Self {
        match value {
            Payment::Cash => Self::Cash,
            Payment::Card => Self::Card,
            Payment::Upi => Self::Upi,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[arg(long)]
    street: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    pincode: String,

    #[arg(long)]
    landmark: Option<String>,

    /// Name of the person receiving the order
    #[arg(long)]
    contact_name: String,

    #[arg(long)]
    contact_number: String,

    /// Notes for the delivery rider
    #[arg(long)]
    instructions: Option<String>,

    #[arg(long, value_enum, default_value_t = Payment::Cash)]
    payment: Payment,
}

pub(crate) async fn run(session: &ShoppingSession, args: CheckoutArgs) -> Result<(), String> {
    let delivery = DeliveryInfo {
        address: DeliveryAddress {
            street: args.street,
            city: args.city,
            state: args.state,
            pincode: args.pincode,
            landmark: args.landmark,
            contact_name: args.contact_name,
            contact_number: args.contact_number,
        },
        instructions: args.instructions,
        payment_method: args.payment.into(),
    };

    let order = session.checkout(delivery).await.map_err(|error| match &error {
        CheckoutError::OrderingClosed {
            opens_in: Some(opens_in),
            ..
        } => format!("checkout failed: {error}; opens in {opens_in}"),
        CheckoutError::Submission(source) => format!("checkout failed: {error}: {source}"),
        _ => format!("checkout failed: {error}"),
    })?;

    let total = format_money(order.totals.total, session.settings().currency)
        .map_err(|error| format!("failed to format total: {error}"))?;

    println!("order_number: {}", order.order_number);
    println!("order_id: {}", order.id);
    println!("status: {}", order.status);
    println!("restaurant: {}", order.restaurant_name);
    println!("total: {total}");

    if let Some(window) = order.scheduled_delivery {
        println!("delivery: {window}");
    }

    Ok(())
}
