//! Command-line arguments.

use std::path::PathBuf;

use bloom_core::{BasketItem, BouquetSize, Money};
use clap::{Args, Parser, Subcommand};

use crate::state::{ConfigState, StorageBackend};

#[derive(Debug, Parser)]
#[command(name = "bloom")]
#[command(version, about = "Flower basket from the command line")]
pub struct Cli {
    /// Directory holding the basket database or snapshot files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot storage backend
    #[arg(long, global = true, value_enum)]
    pub storage: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Applies flag overrides on top of environment configuration.
    pub fn apply_to(&self, config: &mut ConfigState) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the basket and its totals as JSON
    Show,

    /// Add a bouquet, merging with an existing line of the same flower and size
    Add(AddArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Set a line's quantity; zero or less removes it
    SetQty {
        #[command(flatten)]
        line: LineArgs,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the basket
    Clear,

    /// Print the WhatsApp order message and link
    Checkout,

    /// Show or change the saved storefront language (en, ru, ar)
    Lang { code: Option<String> },

    /// Print the storage backend, migration state and stored keys as JSON
    Status,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub flower_id: String,

    #[arg(long)]
    pub name: String,

    /// S, M, L, XL, WOW or a numeric size code
    #[arg(long, value_parser = parse_size)]
    pub size: BouquetSize,

    /// Unit price, e.g. 149.99
    #[arg(long, value_parser = parse_price)]
    pub price: Money,

    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,

    /// Product image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Product page URL included in the checkout message
    #[arg(long, default_value = "")]
    pub href: String,
}

impl AddArgs {
    pub fn into_item(self) -> BasketItem {
        BasketItem::new(self.flower_id, self.name, self.size, self.price, self.quantity)
            .with_image(self.image)
            .with_href(self.href)
    }
}

#[derive(Debug, Args)]
pub struct LineArgs {
    #[arg(long)]
    pub flower_id: String,

    #[arg(long, value_parser = parse_size)]
    pub size: BouquetSize,
}

fn parse_size(input: &str) -> Result<BouquetSize, String> {
    BouquetSize::parse(input)
        .ok_or_else(|| format!("unknown size '{input}' (expected S, M, L, XL, WOW or a code)"))
}

fn parse_price(input: &str) -> Result<Money, String> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(Money::from_decimal)
        .ok_or_else(|| format!("invalid price '{input}'"))
}
