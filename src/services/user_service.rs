use std::collections::{HashMap, HashSet};

use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::options::FindOptions;
use serde::Serialize;

use crate::models::{Book, Order, User};
use crate::AppState;

pub async fn get_user(state: &AppState, user_id: ObjectId) -> Result<Option<User>, String> {
    let users = state.db.collection::<User>("users");
    users
        .find_one(doc! { "_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())
}

/// The buyer's own order history, newest first.
pub async fn list_user_orders(state: &AppState, user_id: ObjectId) -> Result<Vec<Order>, String> {
    let orders = state.db.collection::<Order>("orders");
    let find_opts = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

    let mut cursor = orders
        .find(doc! { "user": user_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut out: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        out.push(res.map_err(|e| e.to_string())?);
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub book_id: String,
    pub title: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub is_digital: bool,
    pub is_audiobook: bool,
    /// Purchase time, unix epoch milliseconds.
    pub purchased_at: i64,
}

/// Every book the user has bought and paid for, one entry per order line.
/// Lines whose book record no longer exists are skipped.
pub async fn build_library(state: &AppState, user_id: ObjectId) -> Result<Vec<LibraryEntry>, String> {
    let orders = state.db.collection::<Order>("orders");

    let mut cursor = orders
        .find(
            doc! {
                "user": user_id,
                "paymentStatus": "paid",
                "orderStatus": { "$ne": "canceled" },
            },
            None,
        )
        .await
        .map_err(|e| e.to_string())?;

    let mut paid: Vec<Order> = vec![];
    while let Some(res) = cursor.next().await {
        paid.push(res.map_err(|e| e.to_string())?);
    }

    let book_ids: HashSet<ObjectId> = paid
        .iter()
        .flat_map(|o| o.items.iter().map(|item| item.book))
        .collect();

    let mut books_by_id: HashMap<ObjectId, Book> = HashMap::new();
    if !book_ids.is_empty() {
        let books = state.db.collection::<Book>("books");
        let ids: Vec<Bson> = book_ids.into_iter().map(Bson::ObjectId).collect();

        let mut cursor = books
            .find(doc! { "_id": { "$in": ids } }, None)
            .await
            .map_err(|e| e.to_string())?;

        while let Some(res) = cursor.next().await {
            let book = res.map_err(|e| e.to_string())?;
            books_by_id.insert(book.id, book);
        }
    }

    let mut library: Vec<LibraryEntry> = vec![];
    for order in &paid {
        for item in &order.items {
            // line referencing a deleted book is skipped
            let Some(book) = books_by_id.get(&item.book) else {
                continue;
            };

            library.push(LibraryEntry {
                book_id: book.id.to_hex(),
                title: book.title.clone(),
                author: book.author.clone(),
                image_url: book.image_url.clone(),
                is_digital: book.is_digital,
                is_audiobook: book.is_audiobook,
                purchased_at: order.created_at,
            });
        }
    }

    Ok(library)
}
