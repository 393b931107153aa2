use std::io;

use tiffin::receipt;
use tiffin_app::shopping::ShoppingSession;

pub(crate) fn run(session: &ShoppingSession) -> Result<(), String> {
    let settings = session.settings();

    receipt::write_menu(io::stdout().lock(), &settings.menu, settings.currency)
        .map_err(|error| format!("failed to print menu: {error}"))
}
