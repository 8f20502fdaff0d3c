//! Product references and the entries the cart and wishlist hold.
//!
//! The storefront never owns product data. It keeps whatever the catalog
//! returned for a product so the cart and wishlist pages can render it
//! without another fetch, and only looks at `id`, `title` and `price`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::price::Price;

/// A product as returned by the catalog API.
///
/// Display fields the storefront does not interpret (`category`,
/// `fullDescription`, ...) are kept in [`Product::extra`] and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog document ID. Accepts the catalog's `_id` spelling on input.
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Opaque pass-through fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only the fields the stores look at.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image_url: None,
            short_description: None,
            extra: Map::new(),
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the short description.
    #[must_use]
    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = Some(description.into());
        self
    }
}

/// A cart line item: a product plus how many units are in the cart.
///
/// Serialized flat, i.e. the product's fields with an extra `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line item for a product with a quantity of 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// A saved product on the wishlist. No quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistEntry(pub Product);

impl WishlistEntry {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.0.id
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.0
    }

    #[must_use]
    pub fn into_product(self) -> Product {
        self.0
    }
}

impl From<Product> for WishlistEntry {
    fn from(product: Product) -> Self {
        Self(product)
    }
}
