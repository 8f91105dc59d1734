//! WooCommerce REST API v3 response types.
//!
//! ## Observed shape notes
//!
//! - Price fields (`price`, `regular_price`, `sale_price`) are decimal
//!   **strings**, empty (`""`) when unset — never `null`, never numbers.
//! - `stock_quantity` is `null` for products without stock management, so it
//!   is modelled as `Option<i64>`.
//! - `stock_status` is one of `"instock"`, `"outofstock"`, `"onbackorder"`.
//! - `meta_data` values are arbitrary JSON (strings, arrays, objects);
//!   modelled as `serde_json::Value` and passed through untouched.
//!
//! Everything optional carries `#[serde(default)]` so a sparse store (or an
//! older WooCommerce) cannot fail deserialization of a whole page.

use serde::Deserialize;

/// A product or post category from `products/categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct WcCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Parent category id; `0` for root categories.
    #[serde(default)]
    pub parent: i64,
}

/// A global product attribute from `products/attributes`.
#[derive(Debug, Clone, Deserialize)]
pub struct WcAttribute {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// One term (value) of a global attribute, from
/// `products/attributes/{id}/terms`.
#[derive(Debug, Clone, Deserialize)]
pub struct WcAttributeTerm {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// A product image reference.
#[derive(Debug, Clone, Deserialize)]
pub struct WcImage {
    #[serde(default)]
    pub id: i64,
    pub src: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alt: String,
}

/// Embedded category reference on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct WcCategoryRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Embedded tag reference on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct WcTagRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Inline attribute block on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct WcProductAttribute {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub visible: bool,
    /// Whether this attribute is used for variation selection.
    #[serde(default)]
    pub variation: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One custom-field entry from a product's `meta_data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct WcMetaData {
    #[serde(default)]
    pub id: i64,
    pub key: String,
    pub value: serde_json::Value,
}

/// A product from `products`.
#[derive(Debug, Clone, Deserialize)]
pub struct WcProduct {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// `simple`, `variable`, `grouped`, or `external`.
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: String,
    #[serde(default)]
    pub images: Vec<WcImage>,
    #[serde(default)]
    pub categories: Vec<WcCategoryRef>,
    #[serde(default)]
    pub tags: Vec<WcTagRef>,
    #[serde(default)]
    pub attributes: Vec<WcProductAttribute>,
    #[serde(default)]
    pub meta_data: Vec<WcMetaData>,
}

/// Name/option pair selected by a variation.
#[derive(Debug, Clone, Deserialize)]
pub struct WcVariationAttribute {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub option: String,
}

/// A product variation from `products/{id}/variations`.
#[derive(Debug, Clone, Deserialize)]
pub struct WcVariation {
    pub id: i64,
    #[serde(default)]
    pub attributes: Vec<WcVariationAttribute>,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: String,
    #[serde(default)]
    pub image: Option<WcImage>,
}
