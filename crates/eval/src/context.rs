//! Line-item context assembly.
//!
//! Builds the fixed-shape JSON context a predicate is evaluated against,
//! from a product entity and a variant entity. The shape is a
//! compatibility contract: every fixed key below is always present (even
//! when null), which is what lets path resolution fail hard on anything
//! else.

use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub sku: String,
    pub key: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// A named variant attribute. A keyed/enum attribute value arrives as an
/// object carrying a `"key"` member; only that key string is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

fn attribute_value(value: &Value) -> Value {
    match value {
        Value::Object(obj) => obj.get("key").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

/// Assemble the evaluation context for one candidate line item.
///
/// `variant.sku` is populated from the variant's key and `variant.key`
/// from its sku. The swap is deliberate: existing discount predicates were
/// written against the swapped fields and the shape must be preserved
/// byte-for-byte.
pub fn build_context(product: &Product, variant: &Variant, bundle_id: Option<&str>) -> Value {
    let mut attributes = Map::new();
    for attr in &variant.attributes {
        attributes.insert(attr.name.clone(), attribute_value(&attr.value));
    }
    json!({
        "quantity": 1,
        "custom": { "bundleId": bundle_id },
        "product": { "id": product.id, "key": product.key },
        "variant": { "sku": variant.key, "key": variant.sku },
        "attributes": attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: "prod-1".to_string(),
            key: "demo-course".to_string(),
        }
    }

    fn sample_variant() -> Variant {
        Variant {
            sku: "SKU-100".to_string(),
            key: "variant-key".to_string(),
            attributes: vec![
                Attribute {
                    name: "mode".to_string(),
                    value: json!({"key": "verified", "label": "Verified"}),
                },
                Attribute {
                    name: "course-key".to_string(),
                    value: json!("DemoX"),
                },
            ],
        }
    }

    #[test]
    fn context_shape_is_fixed() {
        let ctx = build_context(&sample_product(), &sample_variant(), Some("bundle-7"));
        assert_eq!(
            ctx,
            json!({
                "quantity": 1,
                "custom": { "bundleId": "bundle-7" },
                "product": { "id": "prod-1", "key": "demo-course" },
                "variant": { "sku": "variant-key", "key": "SKU-100" },
                "attributes": { "mode": "verified", "course-key": "DemoX" },
            })
        );
    }

    #[test]
    fn sku_and_key_are_swapped() {
        // Compatibility quirk, pinned on purpose.
        let ctx = build_context(&sample_product(), &sample_variant(), None);
        assert_eq!(ctx["variant"]["sku"], json!("variant-key"));
        assert_eq!(ctx["variant"]["key"], json!("SKU-100"));
    }

    #[test]
    fn missing_bundle_id_is_null_not_absent() {
        let ctx = build_context(&sample_product(), &sample_variant(), None);
        assert_eq!(ctx["custom"]["bundleId"], json!(null));
        assert!(ctx["custom"].as_object().unwrap().contains_key("bundleId"));
    }

    #[test]
    fn keyed_attribute_reduces_to_key_string() {
        let ctx = build_context(&sample_product(), &sample_variant(), None);
        assert_eq!(ctx["attributes"]["mode"], json!("verified"));
    }

    #[test]
    fn variant_deserializes_without_attributes() {
        let v: Variant =
            serde_json::from_value(json!({"sku": "S", "key": "K"})).unwrap();
        assert!(v.attributes.is_empty());
    }
}
