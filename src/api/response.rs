use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
