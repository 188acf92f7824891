use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_cookies::Cookies;

use crate::{
    middleware::{
        auth_with_login_access::AuthWithLoginAccess,
        error::AppResult,
        mw_ctx::CtxState,
        utils::{
            cookie_utils::issue_login_jwt,
            extractor_utils::{JsonOrFormValidated, PageParams},
        },
    },
    models::view::{
        article::MyArticlesView,
        user::{LoginView, ProfileStatsView, UserView},
    },
    services::{
        article_service::ArticleService,
        user_service::{UpdateProfileInput, UserService},
    },
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route(
            "/api/users/current",
            get(get_current_user).put(update_current_user),
        )
        .route("/api/users/current/stats", get(get_stats))
        .route("/api/users/current/articles", get(get_my_articles))
}

async fn get_current_user(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
) -> AppResult<Json<UserView>> {
    let user = UserService::new(&state.store).profile(&auth.user_id).await?;
    Ok(Json(user.into()))
}

/// Saves the profile and re-issues the session so the new name shows up.
async fn update_current_user(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    cookies: Cookies,
    JsonOrFormValidated(body): JsonOrFormValidated<UpdateProfileInput>,
) -> AppResult<Json<LoginView>> {
    let user = UserService::new(&state.store)
        .update_profile(&auth.user_id, body)
        .await?;
    let token = state.jwt.create_by_login(&user)?;
    issue_login_jwt(&cookies, token.clone());
    Ok(Json(LoginView {
        token,
        user: user.into(),
    }))
}

async fn get_stats(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
) -> AppResult<Json<ProfileStatsView>> {
    let stats = UserService::new(&state.store).stats(&auth.user_id).await?;
    Ok(Json(stats))
}

async fn get_my_articles(
    State(state): State<Arc<CtxState>>,
    auth: AuthWithLoginAccess,
    Query(params): Query<PageParams>,
) -> AppResult<Json<MyArticlesView>> {
    let view = ArticleService::new(&state.store)
        .my_articles(&auth.user_id, params)
        .await?;
    Ok(Json(view))
}
