//! Data-store side of the seller dashboard: the two window queries, the
//! catalog count, and the `build_dashboard` entry point that feeds the pure
//! reducers in `dashboard_service`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::options::FindOptions;
use serde::Serialize;

use crate::models::{Book, Order, User};
use crate::services::dashboard_service::{
    self, DashboardOrderView, DashboardSummary, DateWindow, DetailItem, DetailOrder,
};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub orders: Vec<DashboardOrderView>,
}

/// All orders the seller participates in within the window, minus canceled
/// and fully refunded ones. Feeds the summary counters.
pub async fn fetch_summary_orders(
    state: &AppState,
    seller_id: ObjectId,
    window: &DateWindow,
) -> Result<Vec<Order>, String> {
    let orders = state.db.collection::<Order>("orders");

    let mut cursor = orders
        .find(
            doc! {
                "items.seller": seller_id,
                "orderStatus": { "$ne": "canceled" },
                "refundStatus": { "$ne": "completed" },
                "createdAt": { "$gte": window.start, "$lte": window.end },
            },
            None,
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut out: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res.map_err(|e| e.to_string())?);
    }
    Ok(out)
}

async fn lookup_user_names(
    state: &AppState,
    ids: HashSet<ObjectId>,
) -> Result<HashMap<ObjectId, String>, String> {
    let mut names = HashMap::new();
    if ids.is_empty() {
        return Ok(names);
    }

    let users = state.db.collection::<User>("users");
    let ids: Vec<Bson> = ids.into_iter().map(Bson::ObjectId).collect();

    let mut cursor = users
        .find(doc! { "_id": { "$in": ids } }, None)
        .await
        .map_err(|e| e.to_string())?;

    while let Some(res) = cursor.next().await {
        let user = res.map_err(|e| e.to_string())?;
        names.insert(user.id, user.name);
    }
    Ok(names)
}

async fn lookup_book_titles(
    state: &AppState,
    ids: HashSet<ObjectId>,
) -> Result<HashMap<ObjectId, String>, String> {
    let mut titles = HashMap::new();
    if ids.is_empty() {
        return Ok(titles);
    }

    let books = state.db.collection::<Book>("books");
    let ids: Vec<Bson> = ids.into_iter().map(Bson::ObjectId).collect();

    let mut cursor = books
        .find(doc! { "_id": { "$in": ids } }, None)
        .await
        .map_err(|e| e.to_string())?;

    while let Some(res) = cursor.next().await {
        let book = res.map_err(|e| e.to_string())?;
        titles.insert(book.id, book.title);
    }
    Ok(titles)
}

/// Paid-or-pending orders in the window with buyer names and book titles
/// joined in, newest first. Feeds the detail projection.
pub async fn fetch_detail_orders(
    state: &AppState,
    seller_id: ObjectId,
    window: &DateWindow,
) -> Result<Vec<DetailOrder>, String> {
    let orders = state.db.collection::<Order>("orders");
    let find_opts = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

    let mut cursor = orders
        .find(
            doc! {
                "items.seller": seller_id,
                "paymentStatus": { "$in": ["paid", "pending"] },
                "orderStatus": { "$ne": "canceled" },
                "refundStatus": { "$ne": "completed" },
                "createdAt": { "$gte": window.start, "$lte": window.end },
            },
            find_opts,
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut raw: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        raw.push(res.map_err(|e| e.to_string())?);
    }

    let buyer_ids: HashSet<ObjectId> = raw.iter().map(|o| o.user).collect();
    let book_ids: HashSet<ObjectId> = raw
        .iter()
        .flat_map(|o| o.items.iter().map(|item| item.book))
        .collect();

    let buyer_names = lookup_user_names(state, buyer_ids).await?;
    let book_titles = lookup_book_titles(state, book_ids).await?;

    Ok(raw
        .into_iter()
        .map(|order| DetailOrder {
            id: order.id,
            buyer_id: order.user,
            // a missing buyer or book record degrades to an empty name, it
            // does not drop the order
            buyer_name: buyer_names.get(&order.user).cloned().unwrap_or_default(),
            payment_status: order.payment_status,
            order_status: order.order_status,
            pricing: order.pricing,
            shipping_address: order.shipping_address,
            items: order
                .items
                .into_iter()
                .map(|item| DetailItem {
                    seller: item.seller,
                    title: book_titles.get(&item.book).cloned().unwrap_or_default(),
                    quantity: item.quantity,
                })
                .collect(),
            created_at: order.created_at,
        })
        .collect())
}

/// Number of books the seller currently lists.
pub async fn count_seller_catalog(state: &AppState, seller_id: ObjectId) -> Result<i64, String> {
    let books = state.db.collection::<Book>("books");
    let count = books
        .count_documents(doc! { "seller": seller_id }, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(count as i64)
}

/// Build the full dashboard for one seller.
///
/// The three reads are independent, so they run concurrently; any one of
/// them failing fails the whole request. The caller either gets a complete,
/// consistent summary + detail pair or an error, never a partial dashboard.
pub async fn build_dashboard(
    state: &AppState,
    seller_id: ObjectId,
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Dashboard, String> {
    let window = dashboard_service::resolve_window(raw_start, raw_end, now);

    let (summary_orders, detail_orders, available_books) = tokio::try_join!(
        fetch_summary_orders(state, seller_id, &window),
        fetch_detail_orders(state, seller_id, &window),
        count_seller_catalog(state, seller_id),
    )?;

    let mut summary = dashboard_service::summarize_orders(&summary_orders, &seller_id);
    summary.available_books = available_books;

    let orders = dashboard_service::project_orders(&detail_orders, &seller_id);

    Ok(Dashboard { summary, orders })
}
