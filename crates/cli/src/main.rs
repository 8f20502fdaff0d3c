//! ShopEase CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Put a product in the cart and look at it
//! shopease cart add --id 65f1 --title "Desk Lamp" --price 39.50
//! shopease cart show
//!
//! # Save a product for later, then move it to the cart
//! shopease wishlist add --id 65f2 --title "Mug" --price 12
//! shopease wishlist move-to-cart 65f2
//!
//! # Sign in and check out
//! shopease login --email sam@example.com --password secret
//! shopease checkout
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and change the cart
//! - `wishlist` - Show and change the wishlist
//! - `login` / `logout` / `whoami` - Session management
//! - `checkout` - Start checkout for the signed-in shopper
//!
//! State is kept in `--data-dir` (or `SHOPEASE_DATA_DIR`), one JSON file
//! per store, so consecutive invocations share one shopping session.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopease_storefront::config::LogFormat;
use shopease_storefront::notify::{
    Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink,
};
use shopease_storefront::{AppContext, AppError, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod view;

use commands::{ProductArgs, account, cart, checkout, wishlist};

#[derive(Parser)]
#[command(name = "shopease")]
#[command(author, version, about = "ShopEase terminal storefront")]
struct Cli {
    /// Directory holding the saved cart, wishlist and session
    #[arg(long, global = true, env = "SHOPEASE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show and change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SHOPEASE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Start checkout
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// List the cart with line totals and the order summary
    Show,
    /// Add one unit of a product
    Add(ProductArgs),
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Product ID
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product
    Add(ProductArgs),
    /// Remove a saved product
    Remove {
        /// Product ID
        id: String,
    },
    /// Remove every saved product
    Clear,
    /// Add a saved product to the cart and remove it from the wishlist
    MoveToCart {
        /// Product ID
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    let config = match cli.data_dir.clone() {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };

    let log_format = config.log_format;
    init_tracing(log_format);

    let sink = Arc::new(RecordingSink::new());
    let result = AppContext::from_config(config, sink.clone()).and_then(|ctx| run(&ctx, cli.command));

    let reported_error = report_notifications(sink.drain(), log_format);

    match result {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            if !reported_error {
                print_error(&e);
            }
            std::process::exit(1);
        }
    }
}

fn run(ctx: &AppContext, command: Commands) -> Result<String, AppError> {
    match command {
        Commands::Cart { action } => match action {
            CartAction::Show => Ok(cart::show(ctx)),
            CartAction::Add(args) => cart::add(ctx, args),
            CartAction::Update { id, quantity } => Ok(cart::update(ctx, &id, quantity)),
            CartAction::Remove { id } => Ok(cart::remove(ctx, &id)),
            CartAction::Clear => Ok(cart::clear(ctx)),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => Ok(wishlist::show(ctx)),
            WishlistAction::Add(args) => wishlist::add(ctx, args),
            WishlistAction::Remove { id } => Ok(wishlist::remove(ctx, &id)),
            WishlistAction::Clear => Ok(wishlist::clear(ctx)),
            WishlistAction::MoveToCart { id } => wishlist::move_to_cart(ctx, &id),
        },
        Commands::Login { email, password } => account::login(ctx, &email, password),
        Commands::Logout => Ok(account::logout(ctx)),
        Commands::Whoami => Ok(account::whoami(ctx)),
        Commands::Checkout => checkout::run(ctx),
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr so command
/// output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to warnings only if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopease_storefront=warn,shopease_cli=warn".into());

    let (json, pretty) = match format {
        LogFormat::Json => (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json)
        .with(pretty)
        .init();
}

/// Report queued notifications. Returns true if any of them was an error.
///
/// Pretty mode prints them to stdout for the shopper. JSON mode sends them
/// to the log stream as structured events instead.
fn report_notifications(notifications: Vec<Notification>, format: LogFormat) -> bool {
    let reported_error = notifications
        .iter()
        .any(|notification| notification.kind == NotificationKind::Error);
    for notification in notifications {
        match format {
            LogFormat::Pretty => print_notification(&notification),
            LogFormat::Json => TracingSink.notify(notification),
        }
    }
    reported_error
}

#[allow(clippy::print_stdout)]
fn print_notification(notification: &Notification) {
    let marker = match notification.kind {
        NotificationKind::Info => "i",
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    };
    println!("{marker} {}", notification.message);
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[allow(clippy::print_stderr)]
fn print_error(error: &AppError) {
    eprintln!("error: {}", error.user_message());
}
