//! Per-request cancellation.
//!
//! Every request runs under a child of the process shutdown token. The token
//! is cancelled when the request future is dropped (client went away) or the
//! server shuts down, which abandons in-flight upstream calls.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tokio_util::sync::CancellationToken;

use crate::AppState;

/// Cancellation token of the current request.
#[derive(Debug, Clone)]
pub struct RequestScope(pub CancellationToken);

impl RequestScope {
    /// Token to pass to the aggregator.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.0
    }
}

/// Installs a `RequestScope` for the request.
pub async fn request_scope(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = state.shutdown.child_token();
    let _guard = token.clone().drop_guard();
    request.extensions_mut().insert(RequestScope(token));
    next.run(request).await
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes mounted without the middleware get a scope of their own.
        Ok(parts
            .extensions
            .get::<Self>()
            .cloned()
            .unwrap_or_else(|| Self(CancellationToken::new())))
    }
}
