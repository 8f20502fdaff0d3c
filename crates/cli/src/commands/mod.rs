//! Command implementations.
//!
//! Each command works against the [`AppContext`](shopease_storefront::AppContext)
//! and returns the text to print. Notifications raised along the way are
//! printed separately by `main`.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod wishlist;

use clap::Args;
use rust_decimal::Decimal;
use shopease_core::{Price, Product};
use shopease_storefront::AppError;

/// Product fields accepted on the command line.
#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    /// Product ID
    #[arg(long)]
    pub id: String,

    /// Product title
    #[arg(long)]
    pub title: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    pub price: Decimal,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,
}

impl TryFrom<ProductArgs> for Product {
    type Error = AppError;

    fn try_from(args: ProductArgs) -> Result<Self, Self::Error> {
        let id = args.id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("product id cannot be empty".to_string()));
        }
        if args.price.is_sign_negative() {
            return Err(AppError::BadRequest("price cannot be negative".to_string()));
        }
        let price = Price::new(args.price);
        if !price.survives_json_round_trip() {
            return Err(AppError::BadRequest(format!(
                "price {} cannot be saved exactly",
                args.price
            )));
        }

        let mut product = Self::new(id, args.title, price);
        if let Some(url) = args.image_url {
            product = product.with_image_url(url);
        }
        if let Some(description) = args.description {
            product = product.with_short_description(description);
        }
        Ok(product)
    }
}
