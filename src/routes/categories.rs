use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{
    entities::category::Category,
    middleware::{error::AppResult, mw_ctx::CtxState},
    services::category_service::CategoryService,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/api/categories", get(get_categories))
}

async fn get_categories(State(state): State<Arc<CtxState>>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryService::new(&state.store).list().await?))
}
