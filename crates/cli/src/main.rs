//! Elegance CLI - the storefront's page behaviors from a terminal.
//!
//! State lives in a directory of JSON files (`STOREFRONT_DATA_DIR`, default
//! `.elegance`), one per storage key, so consecutive invocations behave like
//! consecutive page loads.
//!
//! # Usage
//!
//! ```bash
//! # Add a product and look at the cart
//! elegance cart add "Silk Scarf" 25
//! elegance cart show
//!
//! # Adjust a line
//! elegance cart qty "Silk Scarf" -1
//!
//! # Check out
//! elegance checkout --fullname "Ada Lovelace" --address "1 Analytical Way" \
//!     --email ada@example.com --payment card
//! ```
//!
//! # Commands
//!
//! - `cart add|remove|qty|show|count` - Cart operations
//! - `theme show|toggle` - Color theme
//! - `greet` - Homepage greeting and footer year
//! - `contact` - Validate a contact form submission
//! - `checkout` - Place an order
//!
//! A refused form or order prints the same alert the page would show and
//! exits with status 1.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use elegance_storefront::StorefrontError;
use elegance_storefront::config::StorefrontConfig;
use elegance_storefront::forms::{CheckoutForm, ContactForm};
use elegance_storefront::page::PageController;
use elegance_storefront::storage::{FileStore, Storage};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "elegance_storefront=info,elegance_cli=info";

#[derive(Parser)]
#[command(name = "elegance")]
#[command(author, version, about = "Elegance Wardrobe storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or switch the color theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Print the homepage greeting
    Greet,
    /// Submit the contact form
    Contact {
        /// Your name
        #[arg(long, default_value = "")]
        name: String,

        /// Your email address
        #[arg(long, default_value = "")]
        email: String,

        /// Message text
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Submit the checkout form
    Checkout {
        /// Full name for the order
        #[arg(long, default_value = "")]
        fullname: String,

        /// Delivery address
        #[arg(long, default_value = "")]
        address: String,

        /// Email for the order confirmation
        #[arg(long, default_value = "")]
        email: String,

        /// Payment method
        #[arg(long, default_value = "")]
        payment: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product name
        name: String,

        /// Unit price as written on the product button
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// Remove a product line
    Remove {
        /// Product name
        name: String,
    },
    /// Change a line's quantity by a signed amount
    Qty {
        /// Product name
        name: String,

        /// Amount to add (negative to subtract)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// List the cart lines and total
    Show,
    /// Print the cart badge count
    Count,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Shoppers' mistakes are shown as-is; anything else is logged in full and
/// summarized.
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn report(error: &StorefrontError) {
    if error.is_user_error() {
        println!("{}", error.user_message());
    } else {
        tracing::error!(error = %error, "Command failed");
        eprintln!("{}", error.user_message());
    }
}

fn run(cli: Cli) -> elegance_storefront::Result<ExitCode> {
    let config = StorefrontConfig::from_env()?;
    let mut page = open_page(config);

    let code = match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { name, price } => commands::cart::add(&mut page, name, price),
            CartAction::Remove { name } => commands::cart::remove(&mut page, &name),
            CartAction::Qty { name, delta } => {
                commands::cart::change_quantity(&mut page, &name, delta)
            }
            CartAction::Show => commands::cart::show(&page),
            CartAction::Count => commands::cart::count(&page),
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(&page),
            ThemeAction::Toggle => commands::theme::toggle(&mut page),
        },
        Commands::Greet => commands::home::greet(&chrono::Local::now()),
        Commands::Contact {
            name,
            email,
            message,
        } => commands::forms::contact(&ContactForm {
            name,
            email,
            message,
        })?,
        Commands::Checkout {
            fullname,
            address,
            email,
            payment,
        } => commands::forms::checkout(
            &mut page,
            &CheckoutForm {
                full_name: fullname,
                address,
                email,
                payment,
            },
        )?,
    };
    Ok(code)
}

/// Load the page over the configured data directory.
fn open_page(config: StorefrontConfig) -> PageController<FileStore> {
    let mut store = FileStore::new(config.data_dir.clone());
    if let Some(quota) = config.storage_quota {
        store = store.with_quota(quota);
    }
    tracing::debug!(dir = %store.dir().display(), "Opening storefront data");
    PageController::load(config, Storage::new(store))
}
