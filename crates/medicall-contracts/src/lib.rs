//! # medicall-contracts
//!
//! Shared types, errors, and contracts for the MEDICALL storefront model.
//!
//! Every crate in the workspace imports from here. Apart from a few derived
//! aggregates (line totals, order totals) there is no business logic in this
//! crate, only data definitions and error types.

pub mod cart;
pub mod error;
pub mod notice;
pub mod order;
pub mod product;
pub mod scan;
pub mod service;
pub mod validation;
pub mod vitals;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use cart::CartLineItem;
    use error::MedicallError;
    use order::{Milestone, Order, OrderId, StepStatus, TrackingStep};
    use product::Product;
    use scan::{ImageSource, ScanInput};
    use service::Service;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {id}"), "test product", Decimal::from(price))
    }

    // ── CartLineItem / Order aggregates ──────────────────────────────────────

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartLineItem::new(product("a", 10), 3);
        assert_eq!(item.line_total(), Decimal::from(30));
        assert_eq!(item.id().as_str(), "a");
    }

    #[test]
    fn order_totals_sum_over_items() {
        let order = Order {
            order_id: OrderId("MEDICALL-1".to_string()),
            items: vec![
                CartLineItem::new(product("a", 10), 2),
                CartLineItem::new(product("b", 5), 1),
            ],
            current_step: 1,
            placed_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            estimated_delivery_date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
            tracking_steps: vec![],
        };

        assert_eq!(order.total_items(), 3);
        assert_eq!(order.total_price(), Decimal::from(25));
    }

    // ── Milestone names ──────────────────────────────────────────────────────

    #[test]
    fn milestone_sequence_has_six_named_steps() {
        let names: Vec<&str> = Milestone::SEQUENCE.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "Order Placed",
                "Order Confirmed",
                "Processing",
                "Shipped",
                "Out for Delivery",
                "Delivered"
            ]
        );
        assert!(!Milestone::SEQUENCE.contains(&Milestone::Cancelled));
    }

    #[test]
    fn tracking_step_serializes_with_display_names() {
        let step = TrackingStep::new(
            Milestone::OutForDelivery,
            StepStatus::Active,
            NaiveDate::from_ymd_opt(2026, 3, 2),
        );
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["name"], "Out for Delivery");
        assert_eq!(json["status"], "active");
        assert_eq!(json["date"], "2026-03-02");

        let pending = serde_json::to_value(TrackingStep::pending(Milestone::Shipped)).unwrap();
        assert!(pending.get("date").is_none(), "pending steps carry no date");
    }

    // ── Product serde ────────────────────────────────────────────────────────

    #[test]
    fn product_deserializes_from_catalog_json() {
        let json = serde_json::json!({
            "id": "prod_3",
            "name": "Digital Thermometer",
            "description": "Fast and accurate digital thermometer.",
            "price": 970.00,
            "category": "Diagnostics",
            "imageUrl": "https://placehold.co/300x200.png?text=Thermometer"
        });
        let p: Product = serde_json::from_value(json).unwrap();

        assert_eq!(p.id.as_str(), "prod_3");
        assert_eq!(p.price, Decimal::from(970));
        assert_eq!(p.category.as_deref(), Some("Diagnostics"));
        assert!(p.image_url.is_some());
    }

    #[test]
    fn product_optional_fields_default_to_none() {
        let json = serde_json::json!({
            "id": "x",
            "name": "Plain",
            "description": "",
            "price": 1
        });
        let p: Product = serde_json::from_value(json).unwrap();
        assert!(p.category.is_none());
        assert!(p.image_url.is_none());
    }

    // ── ScanInput priority ───────────────────────────────────────────────────

    #[test]
    fn captured_image_takes_priority_over_upload() {
        let input = ScanInput {
            captured: Some(vec![1, 2, 3]),
            uploaded: Some(vec![9]),
        };
        let (source, bytes) = input.image().unwrap();
        assert_eq!(source, ImageSource::Camera);
        assert_eq!(bytes, &[1, 2, 3]);

        let upload_only = ScanInput {
            captured: None,
            uploaded: Some(vec![9]),
        };
        assert_eq!(upload_only.image().unwrap().0, ImageSource::Upload);
        assert!(ScanInput::default().image().is_none());
    }

    // ── MedicallError display messages ───────────────────────────────────────

    #[test]
    fn error_empty_cart_display() {
        let msg = MedicallError::EmptyCart.to_string();
        assert!(msg.contains("cart is empty"));
    }

    #[test]
    fn error_service_failure_display_names_service() {
        let err = MedicallError::service_failure(Service::GoogleFitFetch, "token expired");
        let msg = err.to_string();
        assert!(msg.contains("google-fit-fetch"));
        assert!(msg.contains("token expired"));
    }

    #[test]
    fn error_validation_display() {
        let err = MedicallError::validation("quantity", "must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("invalid quantity"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn error_illegal_transition_display() {
        let err = MedicallError::IllegalTransition {
            step: Milestone::Delivered,
            from: StepStatus::Completed,
            to: StepStatus::Cancelled,
        };
        let msg = err.to_string();
        assert!(msg.contains("Delivered"));
        assert!(msg.contains("completed -> cancelled"));
    }

    #[test]
    fn error_cancelled_display() {
        let err = MedicallError::Cancelled {
            operation: "heart-rate-sensor".to_string(),
        };
        assert!(err.to_string().contains("heart-rate-sensor"));
    }

    #[test]
    fn error_config_error_display() {
        let err = MedicallError::ConfigError {
            reason: "fault rate out of range".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("fault rate out of range"));
    }
}
