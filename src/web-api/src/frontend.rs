//! The single page client, compiled into the binary.

use actix_web::{http::header::ContentType, HttpResponse};

static INDEX_HTML: &str = include_str!("../static/index.html");
static APP_JS: &str = include_str!("../static/app.js");

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

pub async fn app_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/javascript; charset=utf-8")
        .body(APP_JS)
}
