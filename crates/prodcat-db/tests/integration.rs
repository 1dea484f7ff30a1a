//! Offline unit tests for prodcat-db pool configuration and row types.
//! These tests do not require a live database connection.

use prodcat_core::{AppConfig, Environment};
use prodcat_db::{HighRevenueShopRow, PoolConfig, ProductRow, SearchHitRow};
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
        log_level: "info".to_string(),
        default_shop_id: 201,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ProductRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn product_row_has_expected_fields() {
    let row = ProductRow {
        id: 1042_i32,
        name: "Tai nghe Bluetooth".to_string(),
        original_price: Decimal::new(29_900_000, 2),
        stock: 15_i32,
        description: String::new(),
    };

    assert_eq!(row.id, 1042);
    assert_eq!(row.name, "Tai nghe Bluetooth");
    assert_eq!(row.original_price, Decimal::new(29_900_000, 2));
    assert_eq!(row.stock, 15);
    assert!(row.description.is_empty());
}

/// Compile-time smoke test for the search routine's row shape.
#[test]
fn search_hit_row_has_expected_fields() {
    let row = SearchHitRow {
        product_id: 2077_i32,
        product_name: "Bàn phím cơ".to_string(),
        original_price: Decimal::new(125_000_000, 2),
        stock_quantity: 3_i32,
        description: "switch đỏ".to_string(),
    };

    assert_eq!(row.product_id, 2077);
    assert_eq!(row.stock_quantity, 3);
}

/// Compile-time smoke test for the report routine's row shape. `total_orders`
/// is `i64` because Postgres `COUNT` yields `BIGINT`.
#[test]
fn high_revenue_shop_row_has_expected_fields() {
    let row = HighRevenueShopRow {
        shop_id: 201_i32,
        shop_name: "Shop mặc định".to_string(),
        total_orders: 1247_i64,
        total_revenue: Decimal::new(284_750_000_000, 2),
    };

    assert_eq!(row.shop_id, 201);
    assert_eq!(row.total_orders, 1247);
}
