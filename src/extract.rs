//! Purpose: Glue between axum routers and the synchronous `ExpectChain::parse`.
//! Exports: `capture_path_vars`, `buffer_request`.
//! Role: Moves router-extracted params into `PathVars` and buffers bodies into `Bytes`.
//! Invariants: `capture_path_vars` must run after routing (`Router::route_layer`).
//! Invariants: Buffering is bounded; oversized bodies are rejected, not truncated.
use crate::core::error::{Error, ErrorKind};
use crate::path_vars::PathVars;
use axum::extract::{RawPathParams, Request};
use axum::middleware::Next;
use axum::response::Response;
use bytes::Bytes;

/// Middleware storing the matched route's raw params as [`PathVars`].
///
/// ```ignore
/// Router::new()
///     .route("/pools/:pool", post(handler))
///     .route_layer(axum::middleware::from_fn(capture_path_vars));
/// ```
pub async fn capture_path_vars(params: RawPathParams, mut request: Request, next: Next) -> Response {
    let vars = params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    request.extensions_mut().insert(PathVars(vars));
    next.run(request).await
}

/// Collects an axum request body into memory so it can be parsed synchronously.
pub async fn buffer_request(
    request: Request,
    limit: usize,
) -> Result<axum::http::Request<Bytes>, Error> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
        Error::new(ErrorKind::InvalidBody)
            .with_message(format!("failed to buffer request body (limit {limit} bytes)"))
            .with_source(err)
    })?;
    Ok(axum::http::Request::from_parts(parts, bytes))
}
