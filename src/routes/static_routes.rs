use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Serves the built frontend. Paths that are not files get `index.html`, so
/// reloading a client-side route still boots the app.
pub fn static_routes(dir: &Path) -> Router {
    tracing::info!("Serving frontend from: {}", dir.display());
    let index = ServeFile::new(dir.join("index.html"));
    Router::new().fallback_service(
        ServeDir::new(dir)
            .append_index_html_on_directories(true)
            .fallback(index),
    )
}
