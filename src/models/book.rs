use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub title: String,
    pub seller: ObjectId,

    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_digital: bool,
    #[serde(default)]
    pub is_audiobook: bool,
}
