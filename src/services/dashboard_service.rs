//! Pure core of the seller dashboard: date-window resolution and the
//! reduction of order snapshots into summary counters and a per-order detail
//! list. Everything here is in-memory and single pass; the database side
//! lives in `seller_service`.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::models::{Order, OrderStatus, PaymentStatus, Pricing, ShippingAddress};

/// Inclusive creation-time range used to filter orders, epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: i64,
    pub end: i64,
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn end_of_day(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    dt.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn custom_window(raw_start: &str, raw_end: &str) -> Option<DateWindow> {
    let start = parse_date(raw_start)?;
    let end = parse_date(raw_end)?;
    // Ordering is checked on the values as supplied, before the end is
    // widened to the last instant of its calendar day.
    if start > end {
        return None;
    }
    let end = end_of_day(end)?;
    Some(DateWindow {
        start: start.timestamp_millis(),
        end: end.timestamp_millis(),
    })
}

fn default_window(now: DateTime<Utc>) -> DateWindow {
    DateWindow {
        start: (now - Duration::days(30)).timestamp_millis(),
        end: now.timestamp_millis(),
    }
}

/// Resolve a caller-supplied date range into a window that is always valid.
///
/// A custom window is only used when both ends are supplied, both parse, and
/// they are in order; anything else degrades to the trailing 30 days ending
/// at `now`. Bad input is a diagnostics concern, never a caller-visible
/// error.
pub fn resolve_window(
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    now: DateTime<Utc>,
) -> DateWindow {
    if let (Some(raw_start), Some(raw_end)) = (raw_start, raw_end) {
        match custom_window(raw_start, raw_end) {
            Some(window) => return window,
            None => {
                tracing::warn!(raw_start, raw_end, "invalid date range, using last 30 days");
            }
        }
    }
    default_window(now)
}

/// Find this seller's share in an order's multi-vendor breakdown.
///
/// Ids are compared by their hex form since breakdown entries and caller ids
/// may come from different representations. Entries are few, so a linear
/// scan; `None` marks a record without an entry for this seller, which the
/// caller treats as zero.
pub fn seller_share(pricing: &Pricing, seller_id: &ObjectId) -> Option<f64> {
    let seller_hex = seller_id.to_hex();
    pricing
        .seller_breakdown
        .iter()
        .find(|entry| entry.seller.to_hex() == seller_hex)
        .map(|entry| entry.total)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub paid_and_delivered_orders: i64,
    pub pending_payment_orders: i64,
    pub processing_orders: i64,
    pub total_revenue: f64,
    pub available_books: i64,
}

/// Reduce the summary snapshot into the dashboard counters.
///
/// Only paid orders count toward `total_orders` and revenue, and a paid
/// order lands in at most one of the delivered/processing buckets. Pending
/// orders are counted separately and never contribute revenue. Any other
/// payment status is ignored: upstream filtering should have removed those,
/// but a stray one must not fail the pass. `available_books` is sourced from
/// the catalog count, not from orders, and is left at zero here.
pub fn summarize_orders(orders: &[Order], seller_id: &ObjectId) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    let mut missing_breakdowns = 0usize;

    for order in orders {
        match order.payment_status {
            PaymentStatus::Paid => {
                summary.total_orders += 1;
                match seller_share(&order.pricing, seller_id) {
                    Some(share) => summary.total_revenue += share,
                    None => missing_breakdowns += 1,
                }
                if order.order_status == OrderStatus::Delivered {
                    summary.paid_and_delivered_orders += 1;
                } else if order.order_status == OrderStatus::Processing {
                    summary.processing_orders += 1;
                }
            }
            PaymentStatus::Pending => summary.pending_payment_orders += 1,
            _ => {}
        }
    }

    if missing_breakdowns > 0 {
        tracing::debug!(missing_breakdowns, "paid orders without a breakdown entry for seller");
    }

    summary
}

/// Order row from the detail query with buyer name and book titles already
/// joined in, so projection needs no further lookups.
#[derive(Debug, Clone)]
pub struct DetailOrder {
    pub id: ObjectId,
    pub buyer_id: ObjectId,
    pub buyer_name: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub pricing: Pricing,
    pub shipping_address: Option<ShippingAddress>,
    pub items: Vec<DetailItem>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct DetailItem {
    pub seller: ObjectId,
    pub title: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyerView {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingView {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub seller_earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookLine {
    pub title: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOrderView {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer: BuyerView,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub pricing: PricingView,
    pub shipping_address: Option<ShippingAddress>,
    pub books: Vec<BookLine>,
    pub created_at: i64,
}

fn project_order(order: &DetailOrder, seller_id: &ObjectId) -> DashboardOrderView {
    let seller_hex = seller_id.to_hex();

    // Only this seller's slice of the order is visible: other sellers' line
    // items never leak into the view.
    let books = order
        .items
        .iter()
        .filter(|item| item.seller.to_hex() == seller_hex)
        .map(|item| BookLine {
            title: item.title.clone(),
            quantity: item.quantity,
        })
        .collect();

    DashboardOrderView {
        id: order.id.to_hex(),
        buyer: BuyerView {
            id: order.buyer_id.to_hex(),
            name: order.buyer_name.clone(),
        },
        payment_status: order.payment_status,
        order_status: order.order_status,
        pricing: PricingView {
            subtotal: order.pricing.subtotal,
            delivery_fee: order.pricing.delivery_fee,
            total: order.pricing.total,
            seller_earnings: seller_share(&order.pricing, seller_id).unwrap_or(0.0),
        },
        shipping_address: order.shipping_address.clone(),
        books,
        created_at: order.created_at,
    }
}

/// Project the detail snapshot into per-order views, newest first.
///
/// Each order id appears exactly once even if the snapshot carries
/// duplicates. The store already sorts its query, but the descending order is
/// a contract of this projection, not of the query plan.
pub fn project_orders(orders: &[DetailOrder], seller_id: &ObjectId) -> Vec<DashboardOrderView> {
    let mut seen: HashSet<ObjectId> = HashSet::new();
    let mut views: Vec<DashboardOrderView> = orders
        .iter()
        .filter(|order| seen.insert(order.id))
        .map(|order| project_order(order, seller_id))
        .collect();

    views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    views
}
