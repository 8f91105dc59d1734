//! Read-only client for the legacy WooCommerce REST API (v3).

mod client;
mod error;
mod types;

pub use client::WcClient;
pub use error::WcError;
pub use types::{
    WcAttribute, WcAttributeTerm, WcCategory, WcCategoryRef, WcImage, WcMetaData, WcProduct,
    WcProductAttribute, WcTagRef, WcVariation, WcVariationAttribute,
};
