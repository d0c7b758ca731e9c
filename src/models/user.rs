use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Seller,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub email: String,

    // bcrypt hash, never serialized back out
    #[serde(default, skip_serializing)]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
