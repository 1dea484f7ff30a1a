//! Reporting queries. Currently a single routine: high-revenue shops for a
//! given year above a revenue threshold.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::DbError;

/// A row from `sp_get_high_revenue_shops`, ordered by revenue descending.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HighRevenueShopRow {
    #[sqlx(rename = "Shop_ID")]
    pub shop_id: i32,
    #[sqlx(rename = "ShopName")]
    pub shop_name: String,
    #[sqlx(rename = "TotalOrders")]
    pub total_orders: i64,
    #[sqlx(rename = "TotalRevenue")]
    pub total_revenue: Decimal,
}

/// Calls `sp_get_high_revenue_shops` with `(year, min_revenue)`.
///
/// Shops with no orders in the year are absent from the result; a threshold
/// above every shop's revenue yields an empty set, not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the routine fails.
pub async fn high_revenue_shops(
    pool: &PgPool,
    year: i32,
    min_revenue: Decimal,
) -> Result<Vec<HighRevenueShopRow>, DbError> {
    let rows =
        sqlx::query_as::<_, HighRevenueShopRow>("SELECT * FROM sp_get_high_revenue_shops($1, $2)")
            .bind(year)
            .bind(min_revenue)
            .fetch_all(pool)
            .await?;

    Ok(rows)
}
