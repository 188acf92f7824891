use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::{
    middleware::{
        auth_with_login_access::{AuthWithLoginAccess, MaybeAuth},
        error::AppResult,
        mw_ctx::CtxState,
        utils::extractor_utils::JsonOrFormValidated,
    },
    models::view::{
        article::{ArticleDetailView, ArticleView, CommentThreadView, LikeToggleView, ReplyView},
        user::AuthorView,
    },
    services::{
        article_service::{ArticleInput, ArticleListParams, ArticleService, UpdateArticleInput},
        interaction_service::{ContentInput, InteractionService},
    },
    utils::pagination::Page,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/articles", get(get_articles).post(create_article))
        .route("/api/articles/recent", get(get_recent_articles))
        .route(
            "/api/articles/:article_id",
            get(get_article)
                .patch(update_article)
                .delete(delete_article),
        )
        .route("/api/articles/:article_id/like", post(toggle_like))
        .route("/api/articles/:article_id/comments", post(add_comment))
        .route("/api/comments/:comment_id/replies", post(add_reply))
}

async fn author_from_session(state: &CtxState, auth: &AuthWithLoginAccess) -> AuthorView {
    match state.store.users.cached(&auth.user_id).await {
        Some(user) => AuthorView::of(&user),
        None => AuthorView {
            id: auth.user_id.clone(),
            display_name: auth.claims.username.clone(),
            avatar: None,
        },
    }
}

async fn get_articles(
    State(state): State<Arc<CtxState>>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<Json<Page<ArticleView>>> {
    let page = ArticleService::new(&state.store).list_public(params).await?;
    Ok(Json(page))
}

async fn get_recent_articles(
    State(state): State<Arc<CtxState>>,
) -> AppResult<Json<Vec<ArticleView>>> {
    Ok(Json(ArticleService::new(&state.store).recent().await?))
}

async fn get_article(
    State(state): State<Arc<CtxState>>,
    viewer: MaybeAuth,
    Path(article_id): Path<String>,
) -> AppResult<Json<ArticleDetailView>> {
    let detail = ArticleService::new(&state.store)
        .detail(&article_id, viewer.user_id(), viewer.is_admin())
        .await?;
    Ok(Json(detail))
}

async fn create_article(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    JsonOrFormValidated(body): JsonOrFormValidated<ArticleInput>,
) -> AppResult<Response> {
    let article = ArticleService::new(&state.store)
        .create(&auth.user_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(ArticleView::from(article))).into_response())
}

async fn update_article(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Path(article_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<UpdateArticleInput>,
) -> AppResult<Json<ArticleView>> {
    let article = ArticleService::new(&state.store)
        .update_own(&auth.user_id, &article_id, body)
        .await?;
    Ok(Json(article.into()))
}

async fn delete_article(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Path(article_id): Path<String>,
) -> AppResult<()> {
    ArticleService::new(&state.store)
        .delete_own(&auth.user_id, &article_id)
        .await
}

async fn toggle_like(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Path(article_id): Path<String>,
) -> AppResult<Json<LikeToggleView>> {
    let result = InteractionService::new(&state.store)
        .toggle_like(&auth.user_id, &article_id, auth.role().can_access_admin())
        .await?;
    Ok(Json(result))
}

async fn add_comment(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Path(article_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<ContentInput>,
) -> AppResult<Response> {
    let comment = InteractionService::new(&state.store)
        .add_comment(
            &auth.user_id,
            &article_id,
            auth.role().can_access_admin(),
            body,
        )
        .await?;
    let author = author_from_session(&state, &auth).await;
    Ok((
        StatusCode::CREATED,
        Json(CommentThreadView::new(comment, author, vec![])),
    )
        .into_response())
}

async fn add_reply(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Path(comment_id): Path<String>,
    JsonOrFormValidated(body): JsonOrFormValidated<ContentInput>,
) -> AppResult<Response> {
    let reply = InteractionService::new(&state.store)
        .add_reply(
            &auth.user_id,
            &comment_id,
            auth.role().can_access_admin(),
            body,
        )
        .await?;
    let author = author_from_session(&state, &auth).await;
    Ok((StatusCode::CREATED, Json(ReplyView::new(reply, author))).into_response())
}
