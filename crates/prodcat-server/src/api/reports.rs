use axum::{
    extract::{Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{operation_failed, ApiError, AppState};

const TAG_REPORT: &str = "Lỗi Report";

const DEFAULT_REPORT_YEAR: i32 = 2025;

#[derive(Debug, Deserialize)]
pub(super) struct ReportQuery {
    // Both params stay raw strings; conversion happens in the handler so a
    // bad value surfaces as the flat 500, not an extractor rejection.
    pub year: Option<String>,
    pub min_revenue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HighRevenueShopItem {
    shop_id: i32,
    shop_name: String,
    total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    total_revenue: Decimal,
}

impl From<prodcat_db::HighRevenueShopRow> for HighRevenueShopItem {
    fn from(row: prodcat_db::HighRevenueShopRow) -> Self {
        Self {
            shop_id: row.shop_id,
            shop_name: row.shop_name,
            total_orders: row.total_orders,
            total_revenue: row.total_revenue,
        }
    }
}

/// GET /api/reports/high-revenue — positional binding `(year, min_revenue)`.
/// A threshold above every shop's revenue yields an empty array, not an
/// error.
pub(super) async fn high_revenue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<HighRevenueShopItem>>, ApiError> {
    let year = match query.year {
        None => DEFAULT_REPORT_YEAR,
        Some(raw) => raw.trim().parse::<i32>().map_err(|e| {
            operation_failed(&req_id.0, TAG_REPORT, format!("year '{raw}': {e}"))
        })?,
    };
    let min_revenue = match query.min_revenue {
        None => Decimal::ZERO,
        Some(raw) => raw.trim().parse::<Decimal>().map_err(|e| {
            operation_failed(&req_id.0, TAG_REPORT, format!("min_revenue '{raw}': {e}"))
        })?,
    };

    let rows = prodcat_db::high_revenue_shops(&state.pool, year, min_revenue)
        .await
        .map_err(|e| operation_failed(&req_id.0, TAG_REPORT, e.to_string()))?;

    Ok(Json(rows.into_iter().map(HighRevenueShopItem::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_item_serializes_with_camel_case_keys() {
        let item = HighRevenueShopItem::from(prodcat_db::HighRevenueShopRow {
            shop_id: 201,
            shop_name: "Shop mặc định".to_string(),
            total_orders: 1247,
            total_revenue: Decimal::new(284_750_000_000, 2),
        });
        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(value["shopId"], 201);
        assert_eq!(value["shopName"], "Shop mặc định");
        assert_eq!(value["totalOrders"], 1247);
        assert_eq!(value["totalRevenue"], 2_847_500_000.0);
    }
}
