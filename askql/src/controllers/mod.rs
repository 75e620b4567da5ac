pub mod api;
pub mod page;

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
