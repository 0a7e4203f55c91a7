use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================
//
// Pure value types embedded in an Order. None of them has an identity or a
// lifecycle of its own; they are copied into the vendor request as-is.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub street: String,
    pub street_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    /// Region (state) code, e.g. "SP".
    pub uf: String,
    pub zip_code: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_identification: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub sku: String,
    pub name: String,
    /// Unit price
    pub price: f64,
    pub quantity: u32,
    pub discount: f64,
    #[serde(default)]
    pub gift: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub tax_identification: String,
    pub phone_number: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub method: String,
    pub price: f64,
    pub quoted_price: f64,
    pub address: Address,
    /// Freight quote id issued by the store, forwarded to the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    pub delivery_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: String,
    pub total: f64,
    pub discount: f64,
    pub installments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub address: Address,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    pub payment_gateway_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub gateway: String,
}

impl Payment {
    pub const CREDIT_CARD: &'static str = "credit_card";

    pub fn is_credit_card(&self) -> bool {
        self.method == Self::CREDIT_CARD
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_optional_fields_default_to_none() {
        let json = r#"{
            "name": "João Silva",
            "street": "Rua das Flores",
            "streetNumber": "123",
            "district": "Centro",
            "city": "São Paulo",
            "uf": "SP",
            "zipCode": "01234567",
            "phone": "11999999999"
        }"#;

        let address: Address = serde_json::from_str(json).unwrap();

        assert_eq!(address.street_number, "123");
        assert_eq!(address.complement, None);
        assert_eq!(address.tax_identification, None);
    }

    #[test]
    fn test_order_item_gift_defaults_to_false() {
        let json = r#"{"sku":"CAFE-001","name":"Café","price":25.9,"quantity":2,"discount":0}"#;

        let item: OrderItem = serde_json::from_str(json).unwrap();

        assert!(!item.gift);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_payment_credit_card_detection() {
        let json = r#"{
            "method": "credit_card",
            "total": 10.0,
            "discount": 0,
            "installments": 3,
            "subtotal": 10.0,
            "paymentGatewayId": "gw-1",
            "brand": "Visa",
            "gateway": "Vindi",
            "address": {
                "name": "A", "street": "B", "streetNumber": "1", "district": "C",
                "city": "D", "uf": "SP", "zipCode": "0", "phone": "1"
            }
        }"#;

        let mut payment: Payment = serde_json::from_str(json).unwrap();
        assert!(payment.is_credit_card());

        payment.method = "pix".to_string();
        assert!(!payment.is_credit_card());
    }
}
