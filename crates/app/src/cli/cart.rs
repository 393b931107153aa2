use std::io;

use clap::{Args, Subcommand};
use tiffin::{
    cart::{Customization, Customizations, LineUuid},
    receipt,
    settings::parse_price,
};
use tiffin_app::shopping::ShoppingSession;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart lines and totals
    Show,
    /// Add a menu item
    Add(AddArgs),
    /// Change the quantity of a line; 0 removes it
    Update(UpdateArgs),
    /// Remove a line
    Remove(RemoveArgs),
    /// Remove every line
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Menu item id
    item: String,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Customization as NAME=CHOICE or NAME=CHOICE:PRICE (e.g. "Side=Raita:15 INR")
    #[arg(long = "option", value_name = "NAME=CHOICE[:PRICE]")]
    options: Vec<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Line number as shown by `cart show`
    line: usize,

    /// New quantity
    quantity: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Line number as shown by `cart show`
    line: usize,
}

pub(crate) async fn run(session: &ShoppingSession, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => show(session),
        CartSubcommand::Add(args) => add(session, args).await,
        CartSubcommand::Update(args) => {
            let line = line_at(session, args.line)?;

            session
                .update_quantity(line, args.quantity)
                .await
                .map_err(|error| format!("failed to update line {}: {error}", args.line))?;

            show(session)
        }
        CartSubcommand::Remove(args) => {
            let line = line_at(session, args.line)?;

            session.remove_item(line).await;

            show(session)
        }
        CartSubcommand::Clear => {
            session.clear().await;

            println!("Cart cleared.");

            Ok(())
        }
    }
}

async fn add(session: &ShoppingSession, args: AddArgs) -> Result<(), String> {
    let settings = session.settings();

    let item = settings
        .menu_item(&args.item)
        .ok_or_else(|| format!("no menu item with id '{}'", args.item))?;

    let customizations = args
        .options
        .iter()
        .map(|option| parse_customization(option, settings.currency.iso_alpha_code))
        .collect::<Result<Customizations, _>>()?;

    session
        .add_item(item, args.quantity, customizations)
        .await
        .map_err(|error| format!("failed to add {}: {error}", item.name))?;

    show(session)
}

fn show(session: &ShoppingSession) -> Result<(), String> {
    let settings = session.settings();

    receipt::write_cart(
        io::stdout().lock(),
        &session.cart(),
        &settings.pricing,
        settings.currency,
    )
    .map_err(|error| format!("failed to print cart: {error}"))
}

fn line_at(session: &ShoppingSession, number: usize) -> Result<LineUuid, String> {
    let cart = session.cart();

    number
        .checked_sub(1)
        .and_then(|idx| cart.lines().get(idx))
        .map(|line| line.line_id)
        .ok_or_else(|| format!("cart has no line #{number}"))
}

fn parse_customization(value: &str, currency: &str) -> Result<Customization, String> {
    let (name, rest) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=CHOICE, got '{value}'"))?;

    let (choice, additional_price) = match rest.split_once(':') {
        Some((choice, price)) => {
            let (minor_units, found) =
                parse_price(price).map_err(|error| format!("option '{value}': {error}"))?;

            if found.iso_alpha_code != currency {
                return Err(format!(
                    "option '{value}' is priced in {}, expected {currency}",
                    found.iso_alpha_code
                ));
            }

            (choice, minor_units)
        }
        None => (rest, 0),
    };

    if name.trim().is_empty() || choice.trim().is_empty() {
        return Err(format!("expected NAME=CHOICE, got '{value}'"));
    }

    Ok(Customization {
        option_name: name.trim().to_string(),
        selected_choice: choice.trim().to_string(),
        additional_price,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn options_with_and_without_price() -> TestResult {
        let plain = parse_customization("Spice=Mild", "INR")?;
        let priced = parse_customization("Side=Raita:15 INR", "INR")?;

        assert_eq!(plain.selected_choice, "Mild");
        assert_eq!(plain.additional_price, 0);
        assert_eq!(priced.option_name, "Side");
        assert_eq!(priced.additional_price, 15_00);

        Ok(())
    }

    #[test]
    fn malformed_options_are_rejected() {
        assert!(parse_customization("Spice", "INR").is_err());
        assert!(parse_customization("=Mild", "INR").is_err());
        assert!(parse_customization("Side=Raita:15 GBP", "INR").is_err());
    }
}
