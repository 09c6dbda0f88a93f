//! Categories API endpoints.

use api_types::category::CategoryView;
use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{ETag, HeaderMapExt, IfNoneMatch};
use engine::Category;

// The category set only changes with a release.
const CATEGORIES_ETAG: &str = concat!("W/\"categories-", env!("CARGO_PKG_VERSION"), "\"");
const CACHE_CONTROL: &str = "public, max-age=3600, must-revalidate";

fn map_category(category: Category) -> CategoryView {
    CategoryView {
        id: category.id(),
        name: category.label().to_string(),
    }
}

pub async fn list(headers: HeaderMap) -> Response {
    let etag = CATEGORIES_ETAG.parse::<ETag>().ok();

    let not_modified = match (&etag, headers.typed_get::<IfNoneMatch>()) {
        (Some(etag), Some(if_none_match)) => !if_none_match.precondition_passes(etag),
        _ => false,
    };

    let mut response = if not_modified {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        let categories: Vec<CategoryView> = Category::ALL.into_iter().map(map_category).collect();
        Json(categories).into_response()
    };

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    if let Some(etag) = etag {
        headers.typed_insert(etag);
    }
    response
}
