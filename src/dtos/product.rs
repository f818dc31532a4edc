// src/dtos/product.rs
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::product::Product;

const MISSING: &str = "Missing data for required field.";
const NOT_NULLABLE: &str = "Field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_NUMBER: &str = "Not a valid number.";
const NOT_AN_INTEGER: &str = "Not a valid integer.";

// Validated create payload; the id is assigned by the database on insert.
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory_quantity: i32,
    pub img_url: Option<String>,
}

/// Per-field validation report: field name -> messages.
/// Serializes as the bare map, which is the 400 response body.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }
}

/// Validates a raw JSON body into a `NewProduct`.
///
/// `name`, `description`, `price` and `inventory_quantity` are required and
/// type-checked; `img_url` is an optional string. All offending fields are
/// reported together rather than failing on the first one.
pub fn parse_create(body: &Value) -> Result<NewProduct, FieldErrors> {
    let mut errors = FieldErrors::default();

    let obj = match body.as_object() {
        Some(obj) => obj,
        None => {
            errors.push("_schema", "Invalid input type.");
            return Err(errors);
        }
    };

    let name = required_string(obj, "name", &mut errors);
    let description = required_string(obj, "description", &mut errors);

    let price = match obj.get("price") {
        None => {
            errors.push("price", MISSING);
            None
        }
        Some(Value::Null) => {
            errors.push("price", NOT_NULLABLE);
            None
        }
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.push("price", NOT_A_NUMBER);
                None
            }
        },
    };

    let inventory_quantity = match obj.get("inventory_quantity") {
        None => {
            errors.push("inventory_quantity", MISSING);
            None
        }
        Some(Value::Null) => {
            errors.push("inventory_quantity", NOT_NULLABLE);
            None
        }
        Some(v) => match as_i32(v) {
            Some(n) => Some(n),
            None => {
                errors.push("inventory_quantity", NOT_AN_INTEGER);
                None
            }
        },
    };

    let img_url = match obj.get("img_url") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push("img_url", NOT_A_STRING);
            None
        }
    };

    match (name, description, price, inventory_quantity) {
        (Some(name), Some(description), Some(price), Some(inventory_quantity)) => Ok(NewProduct {
            name,
            description,
            price,
            inventory_quantity,
            img_url,
        }),
        _ => Err(errors),
    }
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match obj.get(field) {
        None => {
            errors.push(field, MISSING);
            None
        }
        Some(Value::Null) => {
            errors.push(field, NOT_NULLABLE);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field, NOT_A_STRING);
            None
        }
    }
}

fn as_i32(v: &Value) -> Option<i32> {
    v.as_i64().and_then(|n| i32::try_from(n).ok())
}

/// Overwrites the fields present in the raw update body, in place.
///
/// Unlike the create path this performs no presence validation; a value that
/// cannot be coerced to the column type is returned as an error the caller
/// surfaces as a server error, matching what the database itself would have
/// rejected.
pub fn apply_update(product: &mut Product, body: &Value) -> Result<(), String> {
    if let Some(v) = body.get("name") {
        product.name = v
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid("name"))?;
    }
    if let Some(v) = body.get("description") {
        product.description = v
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| invalid("description"))?;
    }
    if let Some(v) = body.get("price") {
        product.price = v.as_f64().ok_or_else(|| invalid("price"))?;
    }
    if let Some(v) = body.get("inventory_quantity") {
        product.inventory_quantity = as_i32(v).ok_or_else(|| invalid("inventory_quantity"))?;
    }
    if let Some(v) = body.get("img_url") {
        product.img_url = match v {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            _ => return Err(invalid("img_url")),
        };
    }
    Ok(())
}

fn invalid(field: &str) -> String {
    format!("uncoercible value for column {field}")
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory_quantity: i32,
    pub img_url: Option<String>,
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            inventory_quantity: product.inventory_quantity,
            img_url: product.img_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "Mug",
            "description": "Stoneware mug",
            "price": 12.5,
            "inventory_quantity": 40,
            "img_url": "https://example.com/mug.png"
        })
    }

    #[test]
    fn parse_create_accepts_valid_payload() {
        let new = parse_create(&valid_body()).unwrap();
        assert_eq!(new.name, "Mug");
        assert_eq!(new.description, "Stoneware mug");
        assert_eq!(new.price, 12.5);
        assert_eq!(new.inventory_quantity, 40);
        assert_eq!(new.img_url.as_deref(), Some("https://example.com/mug.png"));
    }

    #[test]
    fn parse_create_allows_omitted_img_url() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("img_url");
        let new = parse_create(&body).unwrap();
        assert_eq!(new.img_url, None);
    }

    #[test]
    fn parse_create_reports_missing_required_fields() {
        let errors = parse_create(&json!({"price": 1.0})).unwrap_err();
        let rendered = serde_json::to_value(&errors).unwrap();
        for field in ["name", "description", "inventory_quantity"] {
            assert_eq!(rendered[field], json!([MISSING]), "expected error for {field}");
        }
        assert!(rendered.get("price").is_none());
    }

    #[test]
    fn parse_create_reports_wrong_types() {
        let body = json!({
            "name": 7,
            "description": "ok",
            "price": "cheap",
            "inventory_quantity": 1.5
        });
        let errors = parse_create(&body).unwrap_err();
        let rendered = serde_json::to_value(&errors).unwrap();
        assert_eq!(rendered["name"], json!([NOT_A_STRING]));
        assert_eq!(rendered["price"], json!([NOT_A_NUMBER]));
        assert_eq!(rendered["inventory_quantity"], json!([NOT_AN_INTEGER]));
    }

    #[test]
    fn parse_create_rejects_null_required_field() {
        let mut body = valid_body();
        body["name"] = Value::Null;
        let errors = parse_create(&body).unwrap_err();
        let rendered = serde_json::to_value(&errors).unwrap();
        assert_eq!(rendered["name"], json!([NOT_NULLABLE]));
    }

    #[test]
    fn parse_create_rejects_non_object_body() {
        let errors = parse_create(&json!([1, 2, 3])).unwrap_err();
        let rendered = serde_json::to_value(&errors).unwrap();
        assert_eq!(rendered["_schema"], json!(["Invalid input type."]));
    }

    #[test]
    fn parse_create_accepts_integer_price() {
        let mut body = valid_body();
        body["price"] = json!(10);
        let new = parse_create(&body).unwrap();
        assert_eq!(new.price, 10.0);
    }

    fn stored_product() -> Product {
        Product {
            id: 1,
            name: "Mug".into(),
            description: "Stoneware mug".into(),
            price: 12.5,
            inventory_quantity: 40,
            img_url: None,
        }
    }

    #[test]
    fn apply_update_overwrites_only_present_fields() {
        let mut product = stored_product();
        apply_update(&mut product, &json!({"price": 9.99})).unwrap();
        assert_eq!(product.price, 9.99);
        assert_eq!(product.name, "Mug");
        assert_eq!(product.description, "Stoneware mug");
        assert_eq!(product.inventory_quantity, 40);
        assert_eq!(product.img_url, None);
    }

    #[test]
    fn apply_update_can_clear_img_url() {
        let mut product = stored_product();
        product.img_url = Some("https://example.com/old.png".into());
        apply_update(&mut product, &json!({"img_url": null})).unwrap();
        assert_eq!(product.img_url, None);
    }

    #[test]
    fn apply_update_rejects_uncoercible_value() {
        let mut product = stored_product();
        assert!(apply_update(&mut product, &json!({"name": null})).is_err());
        assert!(apply_update(&mut product, &json!({"price": "free"})).is_err());
    }

    #[test]
    fn apply_update_ignores_non_object_body() {
        let mut product = stored_product();
        apply_update(&mut product, &json!(["name"])).unwrap();
        assert_eq!(product.name, "Mug");
    }

    #[test]
    fn response_serializes_fields_in_declared_order() {
        let rendered = serde_json::to_string(&ProductResponse::from(stored_product())).unwrap();
        assert_eq!(
            rendered,
            r#"{"id":1,"name":"Mug","description":"Stoneware mug","price":12.5,"inventory_quantity":40,"img_url":null}"#
        );
    }

    #[test]
    fn load_then_dump_preserves_required_fields() {
        let new = parse_create(&valid_body()).unwrap();
        let stored = Product {
            id: 7,
            name: new.name,
            description: new.description,
            price: new.price,
            inventory_quantity: new.inventory_quantity,
            img_url: new.img_url,
        };
        let rendered = serde_json::to_value(ProductResponse::from(stored)).unwrap();
        assert_eq!(rendered["name"], json!("Mug"));
        assert_eq!(rendered["description"], json!("Stoneware mug"));
        assert_eq!(rendered["price"], json!(12.5));
        assert_eq!(rendered["inventory_quantity"], json!(40));
    }
}
