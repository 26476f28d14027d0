//! # Commands Module
//!
//! One function per subcommand, all taking only the state they need.
//!
//! | Subcommand | Function                           | Output |
//! |------------|------------------------------------|--------|
//! | `show`     | [`basket::get_basket`]             | JSON   |
//! | `add`      | [`basket::add_to_basket`]          | JSON   |
//! | `remove`   | [`basket::remove_from_basket`]     | JSON   |
//! | `set-qty`  | [`basket::update_basket_item`]     | JSON   |
//! | `clear`    | [`basket::clear_basket`]           | JSON   |
//! | `checkout` | [`checkout::checkout`]             | text   |
//! | `lang`     | [`preferences::get_language`] / [`preferences::set_language`] | text |
//! | `status`   | [`status::status`]                 | JSON   |

pub mod basket;
pub mod checkout;
pub mod preferences;
pub mod status;

use crate::cli::Command;
use crate::error::CliError;
use crate::state::{ConfigState, SharedBasket, StorageHandle};

/// Runs `command` and returns what should be printed on stdout.
pub async fn execute(
    command: Command,
    basket: &SharedBasket<StorageHandle>,
    storage: &StorageHandle,
    config: &ConfigState,
) -> Result<String, CliError> {
    let output = match command {
        Command::Show => serde_json::to_string_pretty(&basket::get_basket(basket))?,
        Command::Add(args) => {
            let response = basket::add_to_basket(basket, args.into_item())?;
            serde_json::to_string_pretty(&response)?
        }
        Command::Remove(line) => {
            let response = basket::remove_from_basket(basket, &line.flower_id, line.size);
            serde_json::to_string_pretty(&response)?
        }
        Command::SetQty { line, quantity } => {
            let response =
                basket::update_basket_item(basket, &line.flower_id, line.size, quantity)?;
            serde_json::to_string_pretty(&response)?
        }
        Command::Clear => serde_json::to_string_pretty(&basket::clear_basket(basket))?,
        Command::Checkout => checkout::checkout(basket, config).to_string(),
        Command::Lang { code: None } => preferences::get_language(storage).to_string(),
        Command::Lang { code: Some(code) } => {
            preferences::set_language(storage, &code)?.to_string()
        }
        Command::Status => serde_json::to_string_pretty(&status::status(storage, config).await?)?,
    };

    Ok(output)
}
