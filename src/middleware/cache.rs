use axum::{
    body::Body,
    http::{header, Request, Response},
    middleware::Next,
};

/// Middleware to set cache control headers
/// - Static files: Allow caching (1 year for immutable assets)
/// - All other routes: No caching (prevent browser cache)
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    // Clone the path before moving req
    let path = req.uri().path().to_string();
    let mut response = next.run(req).await;

    let is_static_file = path.starts_with("/static/")
        || path == "/favicon.ico"
        || path.ends_with(".png")
        || path.ends_with(".jpg")
        || path.ends_with(".svg")
        || path.ends_with(".webp")
        || path.ends_with(".css")
        || path.ends_with(".js")
        || path.ends_with(".woff2");

    let headers = response.headers_mut();

    if is_static_file {
        // Cache static files aggressively (1 year)
        headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    } else {
        // Don't cache HTML pages
        headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, header::HeaderValue::from_static("0"));
    }

    response
}
