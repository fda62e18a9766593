//! Storefront State CLI - inspect and edit a stored storefront session.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! np-cart cart add --product-id A --quantity 2 --price 10 --name "Oak chair"
//!
//! # Set an exact quantity (0 or less removes the line)
//! np-cart cart update A 5
//!
//! # Show cart contents and totals as JSON
//! np-cart cart show
//!
//! # Change display preferences
//! np-cart prefs currency euro
//!
//! # Remove all stored state
//! np-cart reset
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, update, clear, show, and check out the cart
//! - `prefs` - Show or change display language and currency
//! - `reset` - Delete the stored cart and preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_state_core::{CartItem, Currency, Language};

mod commands;

#[derive(Parser)]
#[command(name = "np-cart")]
#[command(author, version, about = "Storefront cart and preference tools")]
struct Cli {
    /// Directory holding the stored session (overrides `STOREFRONT_STATE_DIR`)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Replace unreadable records with defaults instead of failing
    #[arg(long, global = true)]
    reset_corrupt: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Delete the stored cart and preferences
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add an item (merges with an existing entry for the same product)
    Add {
        /// Product identifier
        #[arg(short, long)]
        product_id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Unit price
        #[arg(long)]
        price: Decimal,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Material label
        #[arg(short, long, default_value = "")]
        material: String,
    },
    /// Remove a product
    Remove {
        /// Product identifier
        product_id: String,
    },
    /// Set a product's quantity (0 or less removes it)
    Update {
        /// Product identifier
        product_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Print the cart and totals as JSON
    Show,
    /// Print the final cart and clear it
    Checkout,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences as JSON
    Show,
    /// Set the display language (English, Spanish, French)
    Language {
        language: Language,
    },
    /// Set the display currency (Dollar, Euro, Rupees)
    Currency {
        currency: Currency,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_state=info,np_cart=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut session = commands::open_session(cli.state_dir, cli.reset_corrupt)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
                price,
                name,
                image_url,
                material,
            } => {
                let item = CartItem::new(product_id, quantity, price)
                    .with_name(name)
                    .with_image_url(image_url)
                    .with_material(material);
                commands::cart::add(&mut session, item)?;
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&mut session, &product_id)?;
            }
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&mut session, &product_id, quantity)?,
            CartAction::Clear => commands::cart::clear(&mut session)?,
            CartAction::Show => commands::cart::show(&session)?,
            CartAction::Checkout => commands::cart::checkout(&mut session)?,
        },
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::prefs::show(&session)?,
            PrefsAction::Language { language } => {
                commands::prefs::set_language(&mut session, language)?;
            }
            PrefsAction::Currency { currency } => {
                commands::prefs::set_currency(&mut session, currency)?;
            }
        },
        Commands::Reset => commands::reset(&mut session)?,
    }
    Ok(())
}
