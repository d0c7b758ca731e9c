use bookmarket::models::{
    Order, OrderStatus, PaymentStatus, Pricing, RefundStatus, SellerEarning,
};
use bookmarket::services::dashboard_service::{
    project_orders, resolve_window, seller_share, summarize_orders, DetailItem, DetailOrder,
};
use chrono::{TimeZone, Utc};
use mongodb::bson::oid::ObjectId;

fn oid(n: u8) -> ObjectId {
    ObjectId::from_bytes([n; 12])
}

fn ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
        .timestamp_millis()
}

fn order(
    id: ObjectId,
    payment_status: PaymentStatus,
    order_status: OrderStatus,
    breakdown: Vec<SellerEarning>,
    created_at: i64,
) -> Order {
    Order {
        id,
        user: oid(99),
        items: vec![],
        pricing: Pricing {
            subtotal: 0.0,
            delivery_fee: 0.0,
            total: 0.0,
            seller_breakdown: breakdown,
        },
        payment_status,
        order_status,
        refund_status: RefundStatus::None,
        shipping_address: None,
        created_at,
    }
}

fn detail_order(
    id: ObjectId,
    created_at: i64,
    items: Vec<DetailItem>,
    breakdown: Vec<SellerEarning>,
) -> DetailOrder {
    DetailOrder {
        id,
        buyer_id: oid(99),
        buyer_name: "Test Buyer".to_string(),
        payment_status: PaymentStatus::Paid,
        order_status: OrderStatus::Processing,
        pricing: Pricing {
            subtotal: 30.0,
            delivery_fee: 5.0,
            total: 35.0,
            seller_breakdown: breakdown,
        },
        shipping_address: None,
        items,
        created_at,
    }
}

fn earning(seller: ObjectId, total: f64) -> SellerEarning {
    SellerEarning { seller, total }
}

// ---------------- window resolution ----------------

#[test]
fn window_defaults_to_last_30_days_when_no_range_given() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let window = resolve_window(None, None, now);

    assert_eq!(window.end, now.timestamp_millis());
    assert_eq!(
        window.start,
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    );
}

#[test]
fn window_falls_back_when_start_is_unparsable() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let window = resolve_window(Some("not-a-date"), Some("2024-01-05"), now);

    assert_eq!(window, resolve_window(None, None, now));
}

#[test]
fn window_falls_back_when_end_is_unparsable() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let window = resolve_window(Some("2024-01-01"), Some("05/01/2024"), now);

    assert_eq!(window, resolve_window(None, None, now));
}

#[test]
fn window_falls_back_when_range_is_inverted() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let window = resolve_window(Some("2024-01-10"), Some("2024-01-05"), now);

    assert_eq!(window, resolve_window(None, None, now));
}

#[test]
fn window_falls_back_when_only_one_bound_given() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(
        resolve_window(Some("2024-01-01"), None, now),
        resolve_window(None, None, now)
    );
    assert_eq!(
        resolve_window(None, Some("2024-01-05"), now),
        resolve_window(None, None, now)
    );
}

#[test]
fn explicit_range_includes_entire_end_day() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let window = resolve_window(Some("2024-01-01"), Some("2024-01-05"), now);

    assert_eq!(window.start, ms(2024, 1, 1, 0, 0, 0));
    assert_eq!(window.end, ms(2024, 1, 5, 23, 59, 59) + 999);

    // an order late on the end day is inside the window
    assert!(ms(2024, 1, 5, 23, 0, 0) <= window.end);
    // one second into the next day is not
    assert!(ms(2024, 1, 6, 0, 0, 1) > window.end);
}

#[test]
fn same_day_range_with_time_components_is_ordered_before_widening() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    // raw start is after raw end on the same day, so the range is invalid
    // even though end-of-day widening would have made it look ordered
    let window = resolve_window(
        Some("2024-01-05T10:00:00Z"),
        Some("2024-01-05T08:00:00Z"),
        now,
    );

    assert_eq!(window, resolve_window(None, None, now));
}

// ---------------- earnings extraction ----------------

#[test]
fn seller_share_finds_own_entry() {
    let pricing = Pricing {
        subtotal: 30.0,
        delivery_fee: 5.0,
        total: 35.0,
        seller_breakdown: vec![earning(oid(1), 10.0), earning(oid(2), 20.0)],
    };

    assert_eq!(seller_share(&pricing, &oid(1)), Some(10.0));
    assert_eq!(seller_share(&pricing, &oid(2)), Some(20.0));
    assert_eq!(seller_share(&pricing, &oid(3)), None);
}

// ---------------- summary reduction ----------------

#[test]
fn summary_counts_only_paid_orders_toward_revenue() {
    let seller = oid(1);
    let orders = vec![
        order(
            oid(10),
            PaymentStatus::Paid,
            OrderStatus::Delivered,
            vec![earning(seller, 15.0)],
            ms(2024, 1, 1, 10, 0, 0),
        ),
        order(
            oid(11),
            PaymentStatus::Pending,
            OrderStatus::Processing,
            vec![earning(seller, 50.0)],
            ms(2024, 1, 2, 10, 0, 0),
        ),
    ];

    let summary = summarize_orders(&orders, &seller);

    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.paid_and_delivered_orders, 1);
    assert_eq!(summary.pending_payment_orders, 1);
    assert_eq!(summary.processing_orders, 0);
    // the pending order's 50 never lands in revenue
    assert_eq!(summary.total_revenue, 15.0);
}

#[test]
fn paid_order_lands_in_at_most_one_bucket() {
    let seller = oid(1);
    let orders = vec![
        order(
            oid(10),
            PaymentStatus::Paid,
            OrderStatus::Delivered,
            vec![earning(seller, 10.0)],
            ms(2024, 1, 1, 0, 0, 0),
        ),
        order(
            oid(11),
            PaymentStatus::Paid,
            OrderStatus::Processing,
            vec![earning(seller, 10.0)],
            ms(2024, 1, 2, 0, 0, 0),
        ),
        // shipped is paid but belongs to neither bucket
        order(
            oid(12),
            PaymentStatus::Paid,
            OrderStatus::Shipped,
            vec![earning(seller, 10.0)],
            ms(2024, 1, 3, 0, 0, 0),
        ),
    ];

    let summary = summarize_orders(&orders, &seller);

    assert_eq!(summary.total_orders, 3);
    assert_eq!(summary.paid_and_delivered_orders, 1);
    assert_eq!(summary.processing_orders, 1);
    assert_eq!(summary.total_revenue, 30.0);
}

#[test]
fn failed_and_refunded_orders_contribute_to_no_counter() {
    let seller = oid(1);
    let orders = vec![
        order(
            oid(10),
            PaymentStatus::Failed,
            OrderStatus::Processing,
            vec![earning(seller, 10.0)],
            ms(2024, 1, 1, 0, 0, 0),
        ),
        order(
            oid(11),
            PaymentStatus::Refunded,
            OrderStatus::Delivered,
            vec![earning(seller, 10.0)],
            ms(2024, 1, 2, 0, 0, 0),
        ),
    ];

    let summary = summarize_orders(&orders, &seller);

    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.paid_and_delivered_orders, 0);
    assert_eq!(summary.pending_payment_orders, 0);
    assert_eq!(summary.processing_orders, 0);
    assert_eq!(summary.total_revenue, 0.0);
}

#[test]
fn missing_breakdown_entry_counts_the_order_but_adds_no_revenue() {
    let seller = oid(1);
    let orders = vec![order(
        oid(10),
        PaymentStatus::Paid,
        OrderStatus::Delivered,
        vec![],
        ms(2024, 1, 1, 0, 0, 0),
    )];

    let summary = summarize_orders(&orders, &seller);

    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.paid_and_delivered_orders, 1);
    assert_eq!(summary.total_revenue, 0.0);
}

// ---------------- detail projection ----------------

#[test]
fn projection_exposes_only_this_sellers_items_and_share() {
    let seller_a = oid(1);
    let seller_b = oid(2);

    let orders = vec![detail_order(
        oid(10),
        ms(2024, 1, 1, 0, 0, 0),
        vec![
            DetailItem {
                seller: seller_a,
                title: "Rust in Action".to_string(),
                quantity: 1,
            },
            DetailItem {
                seller: seller_b,
                title: "The Pragmatic Programmer".to_string(),
                quantity: 2,
            },
        ],
        vec![earning(seller_a, 10.0), earning(seller_b, 20.0)],
    )];

    let for_a = project_orders(&orders, &seller_a);
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].pricing.seller_earnings, 10.0);
    assert_eq!(for_a[0].books.len(), 1);
    assert_eq!(for_a[0].books[0].title, "Rust in Action");
    assert_eq!(for_a[0].books[0].quantity, 1);

    let for_b = project_orders(&orders, &seller_b);
    assert_eq!(for_b[0].pricing.seller_earnings, 20.0);
    assert_eq!(for_b[0].books.len(), 1);
    assert_eq!(for_b[0].books[0].title, "The Pragmatic Programmer");
}

#[test]
fn projection_defaults_missing_share_to_zero_without_dropping_the_order() {
    let seller = oid(1);
    let orders = vec![detail_order(
        oid(10),
        ms(2024, 1, 1, 0, 0, 0),
        vec![DetailItem {
            seller,
            title: "Orphaned".to_string(),
            quantity: 1,
        }],
        vec![],
    )];

    let views = project_orders(&orders, &seller);

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].pricing.seller_earnings, 0.0);
}

#[test]
fn projection_sorts_newest_first_and_deduplicates_ids() {
    let seller = oid(1);
    let t1 = ms(2024, 1, 1, 0, 0, 0);
    let t2 = ms(2024, 1, 2, 0, 0, 0);
    let t3 = ms(2024, 1, 3, 0, 0, 0);

    let orders = vec![
        detail_order(oid(11), t2, vec![], vec![]),
        detail_order(oid(10), t1, vec![], vec![]),
        detail_order(oid(12), t3, vec![], vec![]),
        // same id arriving twice must not produce two rows
        detail_order(oid(11), t2, vec![], vec![]),
    ];

    let views = project_orders(&orders, &seller);

    assert_eq!(views.len(), 3);
    let times: Vec<i64> = views.iter().map(|v| v.created_at).collect();
    assert_eq!(times, vec![t3, t2, t1]);
    assert_eq!(views[0].id, oid(12).to_hex());
    assert_eq!(views[1].id, oid(11).to_hex());
    assert_eq!(views[2].id, oid(10).to_hex());
}

// ---------------- the full scenario ----------------

#[test]
fn three_order_scenario_matches_expected_summary_and_detail() {
    let seller = oid(1);
    let t1 = ms(2024, 3, 1, 0, 0, 0);
    let t2 = ms(2024, 3, 2, 0, 0, 0);
    let t3 = ms(2024, 3, 3, 0, 0, 0);

    let summary_set = vec![
        order(
            oid(10),
            PaymentStatus::Paid,
            OrderStatus::Delivered,
            vec![earning(seller, 15.0)],
            t1,
        ),
        order(
            oid(11),
            PaymentStatus::Paid,
            OrderStatus::Processing,
            vec![earning(seller, 25.0)],
            t2,
        ),
        order(oid(12), PaymentStatus::Pending, OrderStatus::Processing, vec![], t3),
    ];

    let summary = summarize_orders(&summary_set, &seller);
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.paid_and_delivered_orders, 1);
    assert_eq!(summary.processing_orders, 1);
    assert_eq!(summary.pending_payment_orders, 1);
    assert_eq!(summary.total_revenue, 40.0);

    let detail_set = vec![
        detail_order(oid(10), t1, vec![], vec![earning(seller, 15.0)]),
        detail_order(oid(11), t2, vec![], vec![earning(seller, 25.0)]),
        detail_order(oid(12), t3, vec![], vec![]),
    ];

    let views = project_orders(&detail_set, &seller);
    assert_eq!(views.len(), 3);

    let earnings: Vec<f64> = views.iter().map(|v| v.pricing.seller_earnings).collect();
    assert_eq!(earnings, vec![0.0, 25.0, 15.0]);
}
