use std::path::PathBuf;

use axum::{Json, Router, routing::get};
use tower_http::services::ServeDir;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(resolve_public_dir()))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

fn resolve_public_dir() -> PathBuf {
    if let Some(path) = std::env::var_os("APP_PUBLIC_DIR") {
        return PathBuf::from(path);
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

pub(crate) fn project_name() -> String {
    let raw = env!("CARGO_PKG_NAME");
    let mut out = String::new();
    for word in raw.split(['_', '-']).filter(|word| !word.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|ch| ch.to_ascii_lowercase()));
        }
    }
    if out.is_empty() { "Todo".to_string() } else { out }
}
