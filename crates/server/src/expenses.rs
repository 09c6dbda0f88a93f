//! Expenses API endpoints.

use std::time::SystemTime;

use api_types::{
    category::CategoryUpdate,
    expense::{ExpenseList, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{ETag, HeaderMapExt, IfModifiedSince, IfNoneMatch, LastModified};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use engine::{Category, Expense};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

const CACHE_CONTROL: &str = "private, must-revalidate";

pub(crate) fn map_expense(expense: Expense) -> ExpenseView {
    let amount = expense.amount_fixed();
    ExpenseView {
        id: expense.id,
        created_at: expense.created_at,
        updated_at: expense.updated_at,
        category: expense.category.label().to_string(),
        payment_type: expense.payment_type.label().to_string(),
        description: expense.description,
        amount,
        user_id: expense.user_id,
    }
}

/// Weak entity tag carrying the watermark at full precision.
fn watermark_etag(watermark: DateTime<Utc>) -> Option<ETag> {
    format!("W/\"{}\"", watermark.timestamp_micros()).parse().ok()
}

/// The watermark as an HTTP date. HTTP dates have whole-second precision,
/// so the watermark is rounded up: the value a client echoes back in
/// `If-Modified-Since` then compares as "not modified".
///
/// Two changes inside the same second share a date, so a client holding the
/// first can get a 304 for the second. The ETag carries microseconds and
/// `If-None-Match` takes precedence over the date.
fn last_modified(watermark: DateTime<Utc>) -> DateTime<Utc> {
    let whole = watermark.trunc_subsecs(0);
    if whole == watermark {
        whole
    } else {
        whole + Duration::seconds(1)
    }
}

/// An empty store is never "not modified".
fn is_not_modified(client_since: SystemTime, watermark: DateTime<Utc>) -> bool {
    if watermark == DateTime::<Utc>::UNIX_EPOCH {
        return false;
    }
    last_modified(watermark) <= DateTime::<Utc>::from(client_since)
}

fn not_modified(etag: Option<ETag>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    if let Some(etag) = etag {
        headers.typed_insert(etag);
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    response
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ExpenseList>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let watermark = state.engine.latest_updated_at().await?;
    let etag = watermark_etag(watermark);

    // If-None-Match wins over If-Modified-Since when both are present.
    if let Some(if_none_match) = headers.typed_get::<IfNoneMatch>() {
        if let Some(etag) = &etag
            && !if_none_match.precondition_passes(etag)
        {
            tracing::debug!(%watermark, "expenses not modified (etag)");
            return Ok(not_modified(Some(etag.clone())));
        }
    } else if let Some(since) = headers.typed_get::<IfModifiedSince>()
        && is_not_modified(since.into(), watermark)
    {
        tracing::debug!(%watermark, "expenses not modified (date)");
        return Ok(not_modified(etag));
    }

    let limit = query.limit.unwrap_or(-1);
    tracing::debug!(limit, "expenses query");
    let expenses: Vec<ExpenseView> = state
        .engine
        .list_expenses(limit)
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    let mut response = Json(expenses).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    headers.typed_insert(LastModified::from(SystemTime::from(last_modified(watermark))));
    if let Some(etag) = etag {
        headers.typed_insert(etag);
    }
    Ok(response)
}

pub async fn update_category(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryUpdate>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let id = Uuid::parse_str(&id).map_err(|err| ServerError::Generic(err.to_string()))?;
    let Json(payload) = payload.map_err(|err| ServerError::Generic(err.body_text()))?;
    let category = Category::try_from(payload.category)?;

    if state.engine.update_expense_category(id, category).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(format!("expense {id} not found")))
    }
}
