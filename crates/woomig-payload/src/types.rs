//! Payload REST API request and response types.
//!
//! Input types serialize with camelCase field names to match the collection
//! schemas; absent optionals are omitted entirely (`skip_serializing_if`)
//! rather than sent as `null`, since Payload treats `null` as an explicit
//! value for relationship fields.

use serde::{Deserialize, Serialize};

/// Response from `POST /api/users/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// Envelope returned by Payload create calls: `{ "doc": {...}, "message": … }`.
#[derive(Debug, Deserialize)]
pub(crate) struct DocEnvelope<T> {
    pub doc: T,
}

/// Envelope returned by Payload find calls. Pagination metadata
/// (`totalDocs`, `page`, …) is ignored; the migrators size their queries so
/// one page is the whole result.
#[derive(Debug, Deserialize)]
pub(crate) struct FindResponse<T> {
    pub docs: Vec<T>,
}

/// Three-way stock state used by the product and variation collections.
///
/// The migration maps the legacy flag binarily: `"instock"` stays in stock,
/// everything else (including `"onbackorder"`) becomes out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "instock")]
    InStock,
    #[serde(rename = "outofstock")]
    OutOfStock,
    #[serde(rename = "onbackorder")]
    OnBackorder,
}

/// Input for creating a category document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub r#type: String,
    /// Payload id of the parent category; forms the category tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// A category document as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDoc {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub r#type: String,
}

/// One selectable value on a product attribute.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeOption {
    pub label: String,
    pub value: String,
}

/// Input for creating a product-attribute document.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttribute {
    pub name: String,
    pub slug: String,
    pub r#type: String,
    pub options: Vec<AttributeOption>,
}

/// A product-attribute document as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeDoc {
    pub id: String,
    pub slug: String,
}

/// Inline attribute block nested inside a product document.
#[derive(Debug, Clone, Serialize)]
pub struct ProductAttributeInput {
    pub name: String,
    pub slug: String,
    pub visible: bool,
    pub variation: bool,
    pub options: Vec<AttributeValue>,
}

/// Wrapper for one attribute option value.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeValue {
    pub value: String,
}

/// Inline tag block nested inside a product document.
#[derive(Debug, Clone, Serialize)]
pub struct TagInput {
    pub name: String,
    pub slug: String,
}

/// One gallery slot referencing an uploaded media document.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    pub image: String,
}

/// SEO sub-record derived from the product name and short description.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Input for creating a product document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub r#type: String,
    pub description: String,
    pub short_description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub stock_quantity: i64,
    pub stock_status: StockStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ProductAttributeInput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<GalleryEntry>,
    pub seo: SeoInput,
}

/// A product document as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDoc {
    pub id: String,
    pub slug: String,
}

/// Input for creating a product-variation document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariation {
    /// Payload id of the parent product; must already exist.
    pub product: String,
    /// Attribute-name → selected-option map.
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub stock_quantity: i64,
    pub stock_status: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A product-variation document as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct VariationDoc {
    pub id: String,
}

/// An uploaded media document.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDoc {
    pub id: String,
    #[serde(default)]
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_serializes_camel_case_and_omits_absent_optionals() {
        let product = NewProduct {
            name: "Red Shoe".into(),
            slug: "red-shoe".into(),
            r#type: "simple".into(),
            description: String::new(),
            short_description: String::new(),
            price: 100_000.0,
            sale_price: None,
            sku: None,
            stock_quantity: 0,
            stock_status: StockStatus::InStock,
            categories: vec!["cat1".into()],
            attributes: vec![],
            tags: vec![],
            meta_data: None,
            featured_image: None,
            gallery: vec![],
            seo: SeoInput {
                meta_title: Some("Red Shoe".into()),
                meta_description: None,
            },
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["stockStatus"], "instock");
        assert_eq!(json["stockQuantity"], 0);
        assert_eq!(json["price"], 100_000.0);
        assert_eq!(json["categories"][0], "cat1");
        assert_eq!(json["seo"]["metaTitle"], "Red Shoe");
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("salePrice"), "absent salePrice must be omitted");
        assert!(!obj.contains_key("sku"), "absent sku must be omitted");
        assert!(!obj.contains_key("featuredImage"));
        assert!(!obj.contains_key("gallery"));
        assert!(!obj.contains_key("metaData"));
        assert!(!json["seo"].as_object().unwrap().contains_key("metaDescription"));
    }

    #[test]
    fn new_category_omits_absent_parent() {
        let category = NewCategory {
            name: "Shoes".into(),
            slug: "shoes".into(),
            description: String::new(),
            r#type: "product".into(),
            parent: None,
        };
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "product");
        assert!(!json.as_object().unwrap().contains_key("parent"));
    }

    #[test]
    fn stock_status_round_trips_wire_names() {
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"outofstock\""
        );
        let parsed: StockStatus = serde_json::from_str("\"onbackorder\"").unwrap();
        assert_eq!(parsed, StockStatus::OnBackorder);
    }
}
