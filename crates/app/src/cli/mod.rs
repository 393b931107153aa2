use clap::{Parser, Subcommand};
use tiffin_app::{config::AppConfig, context::AppContext};

mod cart;
mod checkout;
mod menu;
mod orders;
mod windows;

#[derive(Debug, Parser)]
#[command(name = "tiffin", about = "Tiffin meal ordering CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show every meal's ordering window and whether it is open
    Windows(windows::WindowsArgs),
    /// List the items that can be added to the cart
    Menu,
    /// Inspect and change the cart
    Cart(cart::CartCommand),
    /// Place the cart as an order
    Checkout(checkout::CheckoutArgs),
    /// Inspect and update placed orders
    Orders(orders::OrdersCommand),
}

impl Cli {
    /// Parse arguments, reading a `.env` file first if one is present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config)
            .await
            .map_err(|error| format!("failed to start: {error}"))?;

        let session = &context.session;

        match self.command {
            Commands::Windows(args) => windows::run(session, args),
            Commands::Menu => menu::run(session),
            Commands::Cart(command) => cart::run(session, command).await,
            Commands::Checkout(args) => checkout::run(session, args).await,
            Commands::Orders(command) => orders::run(session, command).await,
        }
    }
}
