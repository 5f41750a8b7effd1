//! Static preview server for the generated output tree.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/live-reload` | Liveness probe for reload scripts (`ok`) |
//! | `GET`  | anything else | File from the output directory (`/` serves `index.html`) |

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::info;

/// Build the preview router serving `output_dir`.
pub(crate) fn router(output_dir: &Path) -> Router {
    Router::new()
        .route("/live-reload", get(handle_live_reload))
        .fallback_service(ServeDir::new(output_dir))
        .layer(middleware::from_fn(no_cache_html))
}

/// Serve `output_dir` on `addr` until Ctrl+C.
pub(crate) async fn serve(addr: &str, output_dir: &Path) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, output = %output_dir.display(), "preview server listening");

    axum::serve(listener, router(output_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn handle_live_reload() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        "ok",
    )
}

/// HTML pages must always be refetched so rebuilds show up on reload.
async fn no_cache_html(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    let is_html = path.ends_with(".html") || path.ends_with('/');

    let mut response = next.run(req).await;
    if is_html {
        let headers = response.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }
    response
}
