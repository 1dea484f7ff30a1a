use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rand::Rng;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{operation_failed, ApiError, AppState};

const PRODUCT_ID_MIN: i32 = 1_000;
const PRODUCT_ID_MAX: i32 = 999_999;

/// `max_price` sentinel meaning "no upper bound".
const MAX_PRICE_UNBOUNDED: i64 = 2_000_000_000;

const MSG_CREATED: &str = "Thêm thành công!";
const MSG_UPDATED: &str = "Cập nhật thành công!";
const MSG_DELETED: &str = "Xóa thành công!";

const TAG_LIST: &str = "Lỗi Get";
const TAG_INSERT: &str = "Lỗi Insert";
const TAG_UPDATE: &str = "Lỗi Update";
const TAG_DELETE: &str = "Lỗi Delete";
const TAG_SEARCH: &str = "Lỗi Search";

/// Public product shape shared by the list and search responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductItem {
    id: i32,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    original_price: Decimal,
    stock: i32,
    description: String,
}

impl From<prodcat_db::ProductRow> for ProductItem {
    fn from(row: prodcat_db::ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            original_price: row.original_price,
            stock: row.stock,
            description: row.description,
        }
    }
}

// The search routine's output columns differ from the list query's; this
// mapping reconciles them to the one public shape.
impl From<prodcat_db::SearchHitRow> for ProductItem {
    fn from(row: prodcat_db::SearchHitRow) -> Self {
        Self {
            id: row.product_id,
            name: row.product_name,
            original_price: row.original_price,
            stock: row.stock_quantity,
            description: row.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProductCreated {
    message: &'static str,
    new_id: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct MessageBody {
    message: &'static str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub keyword: Option<String>,
    // Kept as a raw string so a non-numeric value fails in the handler as a
    // plain 500, not as an extractor rejection.
    pub max_price: Option<String>,
}

/// Validated create/update payload.
///
/// Parsed from a raw JSON value rather than a typed extractor so that a
/// missing field or a non-numeric value surfaces through the flat error
/// contract instead of a 4xx rejection.
#[derive(Debug)]
struct ProductInput {
    name: String,
    original_price: Decimal,
    stock: i32,
    description: String,
}

fn parse_product_input(body: &Value) -> Result<ProductInput, String> {
    let name = match require_field(body, "name")? {
        Value::String(s) => s.clone(),
        _ => return Err("field 'name' must be a string".to_string()),
    };
    let original_price = decimal_field(require_field(body, "originalPrice")?, "originalPrice")?;
    let stock = int_field(require_field(body, "stock")?, "stock")?;
    let description = match body.get("description") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err("field 'description' must be a string".to_string()),
    };

    Ok(ProductInput {
        name,
        original_price,
        stock,
        description,
    })
}

fn require_field<'a>(body: &'a Value, key: &str) -> Result<&'a Value, String> {
    body.get(key)
        .ok_or_else(|| format!("missing required field '{key}'"))
}

// Numbers and numeric strings are both accepted; anything else is a
// conversion failure reported through the flat error contract.
fn decimal_field(value: &Value, key: &str) -> Result<Decimal, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().and_then(Decimal::from_f64),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| format!("field '{key}' is not a number"))
}

#[allow(clippy::cast_possible_truncation)]
fn int_field(value: &Value, key: &str) -> Result<i32, String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| format!("field '{key}' is not an integer"))
}

/// Draws a product id uniformly from the id range. Existing ids are not
/// consulted; a collision violates the primary key and surfaces as the
/// generic operation failure.
fn generate_product_id() -> i32 {
    rand::rng().random_range(PRODUCT_ID_MIN..=PRODUCT_ID_MAX)
}

/// GET /api/products — the fixed list query, rows passed through in
/// database order.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<ProductItem>>, ApiError> {
    let rows = prodcat_db::list_products(&state.pool)
        .await
        .map_err(|e| operation_failed(&req_id.0, TAG_LIST, e.to_string()))?;

    Ok(Json(rows.into_iter().map(ProductItem::from).collect()))
}

/// POST /api/products — draw an id, stamp the creation time, and call the
/// insert routine with its seven positional parameters.
pub(super) async fn add_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductCreated>), ApiError> {
    let Json(body) = body.map_err(|e| operation_failed(&req_id.0, TAG_INSERT, e.to_string()))?;
    let input =
        parse_product_input(&body).map_err(|e| operation_failed(&req_id.0, TAG_INSERT, e))?;

    let new_id = generate_product_id();
    let created_at = Utc::now();

    prodcat_db::insert_product(
        &state.pool,
        new_id,
        input.stock,
        created_at,
        &input.description,
        &input.name,
        input.original_price,
        state.default_shop_id,
    )
    .await
    .map_err(|e| operation_failed(&req_id.0, TAG_INSERT, e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            message: MSG_CREATED,
            new_id,
        }),
    ))
}

/// PUT /api/products/:id — call the update routine with its six positional
/// parameters. No existence check: an unmatched id still reports success.
pub(super) async fn update_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i32>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(body) = body.map_err(|e| operation_failed(&req_id.0, TAG_UPDATE, e.to_string()))?;
    let input =
        parse_product_input(&body).map_err(|e| operation_failed(&req_id.0, TAG_UPDATE, e))?;

    prodcat_db::update_product(
        &state.pool,
        id,
        input.stock,
        &input.description,
        &input.name,
        input.original_price,
        state.default_shop_id,
    )
    .await
    .map_err(|e| operation_failed(&req_id.0, TAG_UPDATE, e.to_string()))?;

    Ok(Json(MessageBody {
        message: MSG_UPDATED,
    }))
}

/// DELETE /api/products/:id — no existence check; an unmatched id still
/// reports success.
pub(super) async fn delete_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i32>,
) -> Result<Json<MessageBody>, ApiError> {
    prodcat_db::delete_product(&state.pool, id)
        .await
        .map_err(|e| operation_failed(&req_id.0, TAG_DELETE, e.to_string()))?;

    Ok(Json(MessageBody {
        message: MSG_DELETED,
    }))
}

/// GET /api/products/search — keyword defaults to empty (match all),
/// `max_price` to the unbounded sentinel.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductItem>>, ApiError> {
    let keyword = query.keyword.unwrap_or_default();
    let max_price = match query.max_price {
        None => MAX_PRICE_UNBOUNDED,
        Some(raw) => raw.trim().parse::<i64>().map_err(|e| {
            operation_failed(&req_id.0, TAG_SEARCH, format!("max_price '{raw}': {e}"))
        })?,
    };

    let hits = prodcat_db::search_products(&state.pool, &keyword, max_price)
        .await
        .map_err(|e| operation_failed(&req_id.0, TAG_SEARCH, e.to_string()))?;

    Ok(Json(hits.into_iter().map(ProductItem::from).collect()))
}
