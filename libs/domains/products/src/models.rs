use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Largest price a `NUMERIC(10, 2)` column holds, exclusive.
const MAX_PRICE_UNITS: i64 = 100_000_000;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    /// Unique across all products
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build an unpersisted product with a fresh id.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price.normalize(),
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field; an omitted description is cleared.
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price.normalize();
        self.quantity = input.quantity;
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
}

/// DTO for replacing a product's fields. Same shape as [`CreateProduct`];
/// fields left out are not carried over from the stored record.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub quantity: i32,
}

/// Non-negative, at most two decimal places, fits `NUMERIC(10, 2)`.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("range").with_message("price must not be negative".into()));
    }

    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("precision")
            .with_message("price must have at most 2 decimal places".into()));
    }

    if *price >= Decimal::from(MAX_PRICE_UNITS) {
        return Err(ValidationError::new("range").with_message("price is too large".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, price: Decimal, quantity: i32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price,
            quantity,
        }
    }

    #[test]
    fn test_price_with_two_decimals_is_valid() {
        assert!(create("Widget", Decimal::new(999, 2), 5).validate().is_ok());
        assert!(create("Widget", Decimal::new(10, 0), 0).validate().is_ok());
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        // 9.900
        assert!(create("Widget", Decimal::new(9900, 3), 1).validate().is_ok());
    }

    #[test]
    fn test_price_with_three_decimals_is_rejected() {
        let errors = create("Widget", Decimal::new(9999, 3), 1)
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let errors = create("Widget", Decimal::new(-100, 2), -1)
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("quantity"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let errors = create("", Decimal::ONE, 1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_apply_update_overwrites_description() {
        let mut product = Product::new(CreateProduct {
            description: Some("blue".to_string()),
            ..create("Widget", Decimal::new(999, 2), 5)
        });

        product.apply_update(UpdateProduct {
            name: "Widget2".to_string(),
            description: None,
            price: Decimal::new(1250, 2),
            quantity: 3,
        });

        assert_eq!(product.name, "Widget2");
        assert_eq!(product.description, None);
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert_eq!(product.quantity, 3);
    }

    #[test]
    fn test_price_serializes_as_number() {
        let product = Product::new(create("Widget", Decimal::new(999, 2), 5));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(9.99));
    }

    #[test]
    fn test_price_deserializes_from_number() {
        let input: CreateProduct =
            serde_json::from_str(r#"{"name":"Widget","price":9.99,"quantity":5}"#).unwrap();
        assert_eq!(input.price, Decimal::new(999, 2));
        assert_eq!(input.description, None);
    }
}
