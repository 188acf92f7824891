mod helpers;

use axum::http::StatusCode;
use blog_portal::models::view::article::{
    ArticleDetailView, CommentThreadView, LikeToggleView, ReplyView,
};
use helpers::article_helpers::{create_article, seed_category};
use helpers::user_helpers::{self, TEST_PASSWORD};
use helpers::{create_fake_login_test_user, create_login_admin};
use blog_portal::models::view::user::LoginView;
use serde_json::json;

async fn toggle(server: &axum_test::TestServer, article_id: &str) -> LikeToggleView {
    let response = server
        .post(&format!("/api/articles/{article_id}/like"))
        .await;
    response.assert_status_ok();
    response.json::<LikeToggleView>()
}

test_with_server!(like_toggles_on_and_off, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Likeable", "public").await;

    let liked = toggle(&server, &article.id).await;
    assert_eq!(liked, LikeToggleView { liked: true, likes_count: 1 });

    // a second reader adds to the count
    create_fake_login_test_user(&server).await;
    let liked = toggle(&server, &article.id).await;
    assert_eq!(liked, LikeToggleView { liked: true, likes_count: 2 });

    let unliked = toggle(&server, &article.id).await;
    assert_eq!(unliked, LikeToggleView { liked: false, likes_count: 1 });
    assert_eq!(backend.records("likes").len(), 1);

    let detail = server
        .get(&format!("/api/articles/{}", article.id))
        .await
        .json::<ArticleDetailView>();
    assert_eq!(detail.likes_count, 1);
    assert!(!detail.liked_by_me);
});

test_with_server!(like_requires_login_and_existing_article, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Likeable", "public").await;
    server
        .post("/api/articles/404/like")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server.get("/api/logout").await;
    server
        .post(&format!("/api/articles/{}/like", article.id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert!(backend.records("likes").is_empty());
});

test_with_server!(replies_attach_to_their_comment, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    let author = create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Discuss", "public").await;

    let response = server
        .post(&format!("/api/articles/{}/comments", article.id))
        .json(&json!({ "content": "First comment" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let first = response.json::<CommentThreadView>();
    assert_eq!(first.author.id, author.id);
    assert!(first.replies.is_empty());

    let second = server
        .post(&format!("/api/articles/{}/comments", article.id))
        .json(&json!({ "content": "Second comment" }))
        .await
        .json::<CommentThreadView>();

    let reader = create_fake_login_test_user(&server).await;
    let response = server
        .post(&format!("/api/comments/{}/replies", second.id))
        .json(&json!({ "content": "Reply to second" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let reply = response.json::<ReplyView>();
    assert_eq!(reply.comment_id, second.id);
    assert_eq!(reply.author.id, reader.id);

    let detail = server
        .get(&format!("/api/articles/{}", article.id))
        .await
        .json::<ArticleDetailView>();
    assert_eq!(detail.comments.len(), 2);
    let thread = detail
        .comments
        .iter()
        .find(|c| c.id == second.id)
        .unwrap();
    assert_eq!(thread.replies.len(), 1);
    assert_eq!(thread.replies[0].content, "Reply to second");
    assert_eq!(thread.replies[0].author.id, reader.id);
    let other = detail.comments.iter().find(|c| c.id == first.id).unwrap();
    assert!(other.replies.is_empty());
});

test_with_server!(comment_validation_and_missing_targets, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Discuss", "public").await;

    server
        .post(&format!("/api/articles/{}/comments", article.id))
        .json(&json!({ "content": "   " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .post("/api/comments/404/replies")
        .json(&json!({ "content": "Into the void" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(backend.records("comments").is_empty());
    assert!(backend.records("replies").is_empty());
});

test_with_server!(cannot_comment_on_hidden_article, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Hidden", "private").await;

    create_fake_login_test_user(&server).await;
    server
        .post(&format!("/api/articles/{}/comments", article.id))
        .json(&json!({ "content": "Peeking" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post(&format!("/api/articles/{}/like", article.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(blocked_user_cannot_write_with_old_session, |server, ctx_state, backend| {
    let category = seed_category(&backend, "Diary");
    let user = create_fake_login_test_user(&server).await;
    let article = create_article(&server, &category, "Before the ban", "public").await;
    let token = user_helpers::login(&server, &user.email, TEST_PASSWORD)
        .await
        .json::<LoginView>()
        .token;

    create_login_admin(&server, &backend, "ADMIN").await;
    server
        .patch(&format!("/api/admin/users/{}/block", user.id))
        .json(&json!({ "reason": "spam" }))
        .await
        .assert_status_ok();
    server.get("/api/logout").await;

    let bearer = format!("Bearer {token}");
    server
        .post(&format!("/api/articles/{}/like", article.id))
        .add_header("Authorization", bearer.clone())
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .post(&format!("/api/articles/{}/comments", article.id))
        .add_header("Authorization", bearer.clone())
        .json(&json!({ "content": "still here" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .post("/api/articles")
        .add_header("Authorization", bearer)
        .json(&json!({
            "title": "After the ban",
            "entryId": category,
            "content": "body",
        }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(backend.records("likes").is_empty());
    assert!(backend.records("comments").is_empty());
    assert_eq!(backend.records("articles").len(), 1);
});
