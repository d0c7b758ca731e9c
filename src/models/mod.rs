pub mod user;
pub mod book;
pub mod order;

pub use user::{CurrentUser, Role, User};
pub use book::Book;
pub use order::{
    Order, OrderItem, OrderStatus, PaymentStatus, Pricing, RefundStatus, SellerEarning,
    ShippingAddress,
};
