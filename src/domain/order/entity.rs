use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value_objects::{Customer, OrderItem, Payment, Shipping};

// ============================================================================
// Order
// ============================================================================
//
// Identity is (external_id, order_number); both are assigned upstream and
// never change inside the pipeline.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub external_id: String,
    pub order_number: String,
    pub channel: String,
    pub items: Vec<OrderItem>,
    pub shipping: Shipping,
    pub customer: Customer,
    pub payment: Payment,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_fields: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_additional_fields: Option<BTreeMap<String, String>>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Human-readable identity used in log lines.
    pub fn identity(&self) -> String {
        format!("{}/{}", self.external_id, self.order_number)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::order::Address;
    use chrono::TimeZone;

    pub fn address() -> Address {
        Address {
            name: "João Silva".to_string(),
            street: "Rua das Flores".to_string(),
            street_number: "123".to_string(),
            complement: Some("Apt 45".to_string()),
            district: "Centro".to_string(),
            city: "São Paulo".to_string(),
            uf: "SP".to_string(),
            zip_code: "01234567".to_string(),
            phone: "11999999999".to_string(),
            tax_identification: None,
        }
    }

    /// A complete order with one regular item and one gift, paid by pix.
    pub fn order() -> Order {
        Order {
            external_id: "ext-1".to_string(),
            order_number: "PED-1".to_string(),
            channel: "ecommerce".to_string(),
            items: vec![
                OrderItem {
                    sku: "CAFE-001".to_string(),
                    name: "Café Premium Gourmet".to_string(),
                    price: 25.9,
                    quantity: 2,
                    discount: 0.0,
                    gift: false,
                },
                OrderItem {
                    sku: "MUG-001".to_string(),
                    name: "Caneca".to_string(),
                    price: 0.0,
                    quantity: 1,
                    discount: 0.0,
                    gift: true,
                },
            ],
            shipping: Shipping {
                method: "sedex".to_string(),
                price: 15.0,
                quoted_price: 12.5,
                address: address(),
                quote_id: Some("quote-9".to_string()),
                delivery_date: Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap(),
            },
            customer: Customer {
                name: "João Silva".to_string(),
                email: "joao.silva@email.com".to_string(),
                tax_identification: "12345678901".to_string(),
                phone_number: "11999999999".to_string(),
            },
            payment: Payment {
                method: "pix".to_string(),
                total: 66.8,
                discount: 0.0,
                installments: 1,
                due_date: None,
                address: address(),
                subtotal: 51.8,
                coupon_code: None,
                coupon_description: None,
                nsu: None,
                tid: None,
                payment_gateway_id: "pix-123456".to_string(),
                brand: None,
                gateway: "pagarme".to_string(),
            },
            project: "prime-store".to_string(),
            additional_fields: None,
            customer_additional_fields: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 7, 10, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_from_camel_case_payload() {
        let json = serde_json::json!({
            "externalId": "prime-12345",
            "orderNumber": "PED-001",
            "channel": "ecommerce",
            "items": [{
                "sku": "CAFE-001", "name": "Café", "quantity": 2,
                "price": 25.90, "discount": 0, "gift": false
            }],
            "customer": {
                "name": "João Silva", "email": "joao.silva@email.com",
                "taxIdentification": "12345678901", "phoneNumber": "11999999999"
            },
            "shipping": {
                "method": "sedex", "price": 15.00, "quotedPrice": 15.00,
                "deliveryDate": "2025-01-15T00:00:00Z",
                "address": {
                    "name": "João Silva", "street": "Rua das Flores", "streetNumber": "123",
                    "district": "Centro", "city": "São Paulo", "uf": "SP",
                    "zipCode": "01234567", "phone": "11999999999"
                }
            },
            "payment": {
                "method": "pix", "total": 66.80, "discount": 0, "installments": 1,
                "subtotal": 51.80, "paymentGatewayId": "pix-123456", "gateway": "pix",
                "address": {
                    "name": "João Silva", "street": "Rua das Flores", "streetNumber": "123",
                    "district": "Centro", "city": "São Paulo", "uf": "SP",
                    "zipCode": "01234567", "phone": "11999999999"
                }
            },
            "project": "prime-store",
            "additionalFields": {"campaign": "summer"},
            "createdAt": "2025-01-07T10:00:00Z"
        });

        let order: Order = serde_json::from_value(json).unwrap();

        assert_eq!(order.identity(), "prime-12345/PED-001");
        assert_eq!(order.items.len(), 1);
        assert_eq!(
            order.additional_fields.as_ref().and_then(|f| f.get("campaign")).map(String::as_str),
            Some("summer")
        );
        assert!(order.customer_additional_fields.is_none());
    }

    #[test]
    fn test_order_serialization_keeps_camel_case_names() {
        let order = fixtures::order();
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["externalId"], "ext-1");
        assert_eq!(value["shipping"]["quoteId"], "quote-9");
        assert_eq!(value["payment"]["paymentGatewayId"], "pix-123456");
        assert!(value.get("additionalFields").is_none());
    }
}
