use std::io;

use clap::Args;
use tiffin::{meals::MinuteOfDay, receipt};
use tiffin_app::shopping::ShoppingSession;

#[derive(Debug, Args)]
pub(crate) struct WindowsArgs {
    /// Time of day to evaluate at (HH:MM); defaults to now
    #[arg(long)]
    at: Option<MinuteOfDay>,
}

pub(crate) fn run(session: &ShoppingSession, args: WindowsArgs) -> Result<(), String> {
    let now = args.at.unwrap_or_else(|| session.time_of_day());

    println!("Time of day: {now}");

    receipt::write_windows(io::stdout().lock(), &session.settings().schedule, now)
        .map_err(|error| format!("failed to print windows: {error}"))
}
