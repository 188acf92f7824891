use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    middleware::mw_ctx::CtxState,
    routes::{admin, articles, auth_routes, categories, users},
};

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(auth_routes::routes())
        .merge(articles::routes())
        .merge(categories::routes())
        .merge(users::routes())
        .merge(admin::routes())
        .with_state(ctx_state.clone())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Prefetches the collections every page starts from. A backend that is
/// down here only leaves the caches empty; requests fetch again anyway.
pub async fn warm_up_store(ctx_state: &CtxState) {
    let store = &ctx_state.store;
    match tokio::try_join!(store.categories.fetch_all(), store.articles.fetch_all()) {
        Ok((categories, articles)) => info!(
            "store warmed up with {} categories and {} articles",
            categories.len(),
            articles.len()
        ),
        Err(err) => warn!("store warm up failed: {err}"),
    }
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
