//! Authenticated client for the target Payload CMS REST API, plus the
//! download-and-reupload image transfer component.

mod client;
mod error;
mod media;
mod types;

pub use client::PayloadClient;
pub use error::PayloadError;
pub use media::ImageTransfer;
pub use types::{
    AttributeDoc, AttributeOption, AttributeValue, CategoryDoc, GalleryEntry, MediaDoc,
    NewAttribute, NewCategory,
    NewProduct, NewVariation, ProductAttributeInput, ProductDoc, SeoInput, StockStatus, TagInput,
    VariationDoc,
};
