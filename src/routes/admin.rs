use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, put},
    Json, Router,
};

use crate::{
    entities::category::Category,
    middleware::{
        admin_access::AdminAccess,
        error::AppResult,
        mw_ctx::CtxState,
        utils::extractor_utils::{JsonOrFormValidated, PageParams, SearchParams},
    },
    models::view::{article::ArticleView, user::UserView},
    services::{
        article_service::{AdminEditArticleInput, ArticleInput, ArticleService, ArticleStatusInput},
        category_service::{CategoryInput, CategoryService},
        user_service::{AdminUsersParams, BlockUserInput, UserService},
    },
    store::SliceStatus,
    utils::pagination::Page,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/users/:user_id/block", patch(block_user))
        .route("/api/admin/users/:user_id/unblock", patch(unblock_user))
        .route(
            "/api/admin/categories",
            get(get_categories).post(create_category),
        )
        .route(
            "/api/admin/categories/:category_id",
            put(rename_category).delete(delete_category),
        )
        .route("/api/admin/articles", get(get_articles).post(create_article))
        .route(
            "/api/admin/articles/:article_id",
            patch(edit_article).delete(delete_article),
        )
        .route(
            "/api/admin/articles/:article_id/status",
            patch(set_article_status),
        )
        .route("/api/admin/store", get(get_store_status))
}

async fn get_users(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Query(params): Query<AdminUsersParams>,
) -> AppResult<Json<Page<UserView>>> {
    let page = UserService::new(&state.store).admin_list(params).await?;
    Ok(Json(page))
}

async fn block_user(
    State(state): State<Arc<CtxState>>,
    admin: AdminAccess,
    Path(user_id): Path<String>,
    body: Option<Json<BlockUserInput>>,
) -> AppResult<Json<UserView>> {
    let input = body.map(|Json(input)| input).unwrap_or_default();
    let user = UserService::new(&state.store)
        .block(admin.user_id(), &user_id, input)
        .await?;
    Ok(Json(user.into()))
}

async fn unblock_user(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserView>> {
    let user = UserService::new(&state.store).unblock(&user_id).await?;
    Ok(Json(user.into()))
}

async fn get_categories(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Page<Category>>> {
    let page = CategoryService::new(&state.store).admin_list(params).await?;
    Ok(Json(page))
}

async fn create_category(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    JsonOrFormValidated(body): JsonOrFormValidated<CategoryInput>,
) -> AppResult<Response> {
    let category = CategoryService::new(&state.store).create(body).await?;
    Ok((StatusCode::CREATED, Json(category)).into_response())
}

async fn rename_category(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(category_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<CategoryInput>,
) -> AppResult<Json<Category>> {
    let category = CategoryService::new(&state.store)
        .rename(&category_id, body)
        .await?;
    Ok(Json(category))
}

async fn delete_category(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(category_id): Path<String>,
) -> AppResult<()> {
    CategoryService::new(&state.store).delete(&category_id).await
}

async fn get_articles(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<ArticleView>>> {
    let page = ArticleService::new(&state.store).admin_list(params).await?;
    Ok(Json(page))
}

async fn create_article(
    State(state): State<Arc<CtxState>>,
    admin: AdminAccess,
    JsonOrFormValidated(body): JsonOrFormValidated<ArticleInput>,
) -> AppResult<Response> {
    let article = ArticleService::new(&state.store)
        .create(admin.user_id(), body)
        .await?;
    Ok((StatusCode::CREATED, Json(ArticleView::from(article))).into_response())
}

async fn edit_article(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(article_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<AdminEditArticleInput>,
) -> AppResult<Json<ArticleView>> {
    let article = ArticleService::new(&state.store)
        .admin_edit(&article_id, body)
        .await?;
    Ok(Json(article.into()))
}

async fn set_article_status(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(article_id): Path<String>,
    Json(body): Json<ArticleStatusInput>,
) -> AppResult<Json<ArticleView>> {
    let article = ArticleService::new(&state.store)
        .admin_set_status(&article_id, body.status)
        .await?;
    Ok(Json(article.into()))
}

async fn delete_article(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
    Path(article_id): Path<String>,
) -> AppResult<()> {
    ArticleService::new(&state.store)
        .admin_delete(&article_id)
        .await
}

async fn get_store_status(
    State(state): State<Arc<CtxState>>,
    _admin: AdminAccess,
) -> Json<Vec<SliceStatus>> {
    Json(state.store.status().await)
}
