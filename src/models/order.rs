use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Status strings as stored on the order documents. Unknown values map to
/// `Other` so one bad record cannot abort a whole aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Canceled,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    #[default]
    None,
    Partial,
    Completed,
    #[serde(other)]
    Other,
}

/// One line of an order. Items of a single order may belong to different
/// sellers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub book: ObjectId,
    pub seller: ObjectId,
    pub quantity: i64,
}

/// Per-seller share of an order's revenue. At most one entry per seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerEarning {
    pub seller: ObjectId,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub seller_breakdown: Vec<SellerEarning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    // buyer
    pub user: ObjectId,

    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub pricing: Pricing,

    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    #[serde(default)]
    pub refund_status: RefundStatus,

    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,

    /// Creation time, unix epoch milliseconds.
    pub created_at: i64,
}
