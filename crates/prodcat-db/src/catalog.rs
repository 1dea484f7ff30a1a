//! Catalog operations over `products`: the fixed list query plus the
//! insert, update, delete, and search routines.
//!
//! Each function executes exactly one statement on a pooled connection.
//! Routine parameters are bound positionally; the orders below are part of
//! the routines' declared signatures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A product row as returned by the fixed list query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub original_price: Decimal,
    pub stock: i32,
    pub description: String,
}

/// A row from `sp_search_products`.
///
/// The routine declares quoted mixed-case output columns; the renames here
/// must match them exactly.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchHitRow {
    #[sqlx(rename = "Product_ID")]
    pub product_id: i32,
    #[sqlx(rename = "ProductName")]
    pub product_name: String,
    #[sqlx(rename = "OriginalPrice")]
    pub original_price: Decimal,
    #[sqlx(rename = "StockQuantity")]
    pub stock_quantity: i32,
    #[sqlx(rename = "Description")]
    pub description: String,
}

/// Returns every product, in whatever order the database yields them.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT product_id AS id, name, original_price, stock_quantity AS stock, description \
         FROM products",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Calls `sp_insert_product`.
///
/// Positional order: product id, stock, created-at, description, name,
/// price, shop id. A duplicate product id violates the primary key and
/// surfaces as [`DbError::Sqlx`]; callers draw ids without a collision check.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the routine fails.
#[allow(clippy::too_many_arguments)]
pub async fn insert_product(
    pool: &PgPool,
    product_id: i32,
    stock: i32,
    created_at: DateTime<Utc>,
    description: &str,
    name: &str,
    original_price: Decimal,
    shop_id: i32,
) -> Result<(), DbError> {
    sqlx::query("CALL sp_insert_product($1, $2, $3, $4, $5, $6, $7)")
        .bind(product_id)
        .bind(stock)
        .bind(created_at)
        .bind(description)
        .bind(name)
        .bind(original_price)
        .bind(shop_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Calls `sp_update_product`.
///
/// Positional order: product id, stock, description, name, price, shop id.
/// Updating an id with no matching row is not an error; the routine simply
/// affects zero rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the routine fails.
pub async fn update_product(
    pool: &PgPool,
    product_id: i32,
    stock: i32,
    description: &str,
    name: &str,
    original_price: Decimal,
    shop_id: i32,
) -> Result<(), DbError> {
    sqlx::query("CALL sp_update_product($1, $2, $3, $4, $5, $6)")
        .bind(product_id)
        .bind(stock)
        .bind(description)
        .bind(name)
        .bind(original_price)
        .bind(shop_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Calls `sp_delete_product`. Deleting a missing id affects zero rows and
/// is not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the routine fails.
pub async fn delete_product(pool: &PgPool, product_id: i32) -> Result<(), DbError> {
    sqlx::query("CALL sp_delete_product($1)")
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Calls `sp_search_products` with `(keyword, max_price)`.
///
/// An empty keyword matches every name; `max_price` is an upper bound on
/// `original_price`, with a very large value acting as "unbounded".
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the routine fails.
pub async fn search_products(
    pool: &PgPool,
    keyword: &str,
    max_price: i64,
) -> Result<Vec<SearchHitRow>, DbError> {
    let rows = sqlx::query_as::<_, SearchHitRow>("SELECT * FROM sp_search_products($1, $2)")
        .bind(keyword)
        .bind(max_price)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
