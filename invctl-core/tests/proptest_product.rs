use invctl_core::{Product, ValidationError};
use proptest::prelude::*;

// Strategy for products that pass every field rule
fn arb_valid_product() -> impl Strategy<Value = Product> {
    (
        1i64..1_000_000,
        "[A-Z0-9-]{1,50}",
        "[a-zA-Z ]{1,50}",
        ".{0,200}",
        0.0f64..1_000_000.0,
        0i64..100_000,
        0i64..100_000,
    )
        .prop_map(
            |(id, sku, name, description, price, quantity, min_quantity)| Product {
                id,
                sku,
                name,
                description,
                price,
                quantity,
                min_quantity,
            },
        )
}

proptest! {
    /// Property: generated products are valid
    #[test]
    fn prop_valid_products_pass(product in arb_valid_product()) {
        prop_assert!(product.is_valid());
    }

    /// Property: JSON round trip preserves every field
    #[test]
    fn prop_json_round_trip(product in arb_valid_product()) {
        let back = Product::from_json(&product.to_json()).unwrap();
        prop_assert_eq!(back, product);
    }

    /// Property: empty SKU or name is always rejected
    #[test]
    fn prop_empty_required_field_rejected(mut product in arb_valid_product(), clear_sku in any::<bool>()) {
        if clear_sku {
            product.sku.clear();
        } else {
            product.name.clear();
        }
        prop_assert!(!product.is_valid());
        let is_empty_err = matches!(product.validate(), Err(ValidationError::Empty { .. }));
        prop_assert!(is_empty_err);
    }

    /// Property: any negative numeric field is rejected
    #[test]
    fn prop_negative_numbers_rejected(
        mut product in arb_valid_product(),
        which in 0usize..3,
        amount in 1i64..1_000_000,
    ) {
        match which {
            0 => product.price = -(amount as f64) / 100.0,
            1 => product.quantity = -amount,
            _ => product.min_quantity = -amount,
        }
        prop_assert!(!product.is_valid());
        let is_negative_err = matches!(product.validate(), Err(ValidationError::Negative { .. }));
        prop_assert!(is_negative_err);
    }

    /// Property: SKU or name past 50 characters is rejected
    #[test]
    fn prop_overlong_fields_rejected(
        mut product in arb_valid_product(),
        extra in 51usize..200,
        on_sku in any::<bool>(),
    ) {
        if on_sku {
            product.sku = "S".repeat(extra);
        } else {
            product.name = "N".repeat(extra);
        }
        prop_assert!(!product.is_valid());
        let is_too_long = matches!(product.validate(), Err(ValidationError::TooLong { max: 50, .. }));
        prop_assert!(is_too_long);
    }
}
