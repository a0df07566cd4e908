//! Product records and their validation at the upstream boundary.
//!
//! The upstream API returns loosely shaped JSON. Records are decoded one by
//! one so that a single bad entry is reported and skipped instead of taking
//! the whole collection down with it.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{CatalogError, RecordError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Price as shown to the user, e.g. `$22.30`.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Wire shape of one upstream record. Unknown fields are ignored.
#[derive(Deserialize)]
struct ProductRecord {
    id: u64,
    title: String,
    price: Decimal,
    image: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    rating: Option<Rating>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = RecordError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if record.title.trim().is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        if record.price.is_sign_negative() && !record.price.is_zero() {
            return Err(RecordError::NegativePrice(record.price.to_string()));
        }
        if Url::parse(&record.image).is_err() {
            return Err(RecordError::InvalidImage(record.image));
        }

        Ok(Product {
            id: ProductId(record.id),
            title: record.title,
            price: record.price,
            image: record.image,
            category: record.category,
            description: record.description,
            rating: record.rating,
        })
    }
}

/// A record refused during decoding, with its position in the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub index: usize,
    pub id: Option<u64>,
    pub reason: RecordError,
}

/// Result of decoding a collection payload: everything that passed
/// validation, in payload order, plus what did not.
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub products: Vec<Product>,
    pub rejected: Vec<Rejected>,
}

pub fn decode_product(value: Value) -> Result<Product, RecordError> {
    let record: ProductRecord =
        serde_json::from_value(value).map_err(|e| RecordError::Shape(e.to_string()))?;
    Product::try_from(record)
}

/// Decode a JSON array of products. Only a non-array payload is an error;
/// bad entries are collected in [`Decoded::rejected`].
pub fn decode_collection(value: Value) -> Result<Decoded, CatalogError> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(CatalogError::NotACollection(json_kind(&other))),
    };

    let mut decoded = Decoded::default();
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry.get("id").and_then(Value::as_u64);
        let result = decode_product(entry).and_then(|product| {
            if seen.insert(product.id) {
                Ok(product)
            } else {
                Err(RecordError::DuplicateId(product.id))
            }
        });

        match result {
            Ok(product) => decoded.products.push(product),
            Err(reason) => {
                log::warn!("Skipping product record #{index}: {reason}");
                decoded.rejected.push(Rejected { index, id, reason });
            }
        }
    }

    Ok(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(id: u64, title: &str, price: Value) -> Value {
        json!({
            "id": id,
            "title": title,
            "price": price,
            "description": "desc",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        })
    }

    #[test]
    fn test_decode_product_reads_upstream_shape() {
        let product = decode_product(record(1, "Fjallraven Backpack", json!(109.95))).unwrap();
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.title, "Fjallraven Backpack");
        assert_eq!(product.price, dec!(109.95));
        assert_eq!(product.category, "electronics");
        assert_eq!(product.rating.as_ref().map(|r| r.count), Some(120));
    }

    #[test]
    fn test_decode_product_keeps_title_verbatim() {
        let title = "Mens Casual Slim Fit ";
        let product = decode_product(record(4, title, json!(15.99))).unwrap();
        assert_eq!(product.title, title);
    }

    #[test]
    fn test_decode_product_rejects_bad_fields() {
        assert_eq!(
            decode_product(record(1, "   ", json!(1))),
            Err(RecordError::EmptyTitle)
        );
        assert_eq!(
            decode_product(record(1, "Thing", json!(-4.5))),
            Err(RecordError::NegativePrice("-4.5".to_string()))
        );
        assert!(matches!(
            decode_product(record(1, "Thing", json!("free"))),
            Err(RecordError::Shape(_))
        ));

        let mut no_image = record(1, "Thing", json!(3));
        no_image["image"] = json!("not a uri");
        assert!(matches!(
            decode_product(no_image),
            Err(RecordError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_decode_collection_keeps_valid_siblings() {
        let mut missing_category = record(3, "Ring", json!(9.99));
        missing_category.as_object_mut().unwrap().remove("category");

        let payload = json!([
            record(1, "Backpack", json!(109.95)),
            record(2, "Shirt", json!(-1)),
            missing_category,
            record(1, "Backpack again", json!(5)),
            record(4, "Jacket", json!(55.99)),
        ]);

        let decoded = decode_collection(payload).unwrap();
        let ids: Vec<u64> = decoded.products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 4]);

        let rejected: Vec<(usize, Option<u64>)> =
            decoded.rejected.iter().map(|r| (r.index, r.id)).collect();
        assert_eq!(rejected, vec![(1, Some(2)), (2, Some(3)), (3, Some(1))]);
        assert_eq!(
            decoded.rejected[2].reason,
            RecordError::DuplicateId(ProductId(1))
        );
    }

    #[test]
    fn test_decode_collection_requires_array() {
        assert_eq!(
            decode_collection(json!({ "id": 1 })).unwrap_err(),
            CatalogError::NotACollection("an object")
        );
        assert!(decode_collection(json!([])).unwrap().products.is_empty());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(109.95)), "$109.95");
        assert_eq!(format_price(dec!(22.3)), "$22.30");
        assert_eq!(format_price(dec!(7)), "$7.00");
        assert_eq!(format_price(dec!(0)), "$0.00");
        assert_eq!(format_price(dec!(1.005)), "$1.01");
    }

    #[test]
    fn test_product_id_parse() {
        assert_eq!("17".parse::<ProductId>(), Ok(ProductId(17)));
        assert_eq!(" 3 ".parse::<ProductId>(), Ok(ProductId(3)));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }
}
