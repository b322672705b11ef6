//! API Integration Tests
//!
//! Each test starts the real server on an ephemeral port over a fresh SQLite
//! file, then drives it with cookie-carrying HTTP clients.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, session_cookie,
    session_set_cookie_header, TestClient, TestServer,
};
use reqwest::StatusCode;

async fn start() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

/// Register a fresh user on `client` and sign it in
async fn sign_up(client: &TestClient) -> (RegisterRequest, UserResponse) {
    let request = RegisterRequest::unique();
    let response = client.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = client
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (request, login.user)
}

async fn create_post(client: &TestClient, categories: &[&str]) -> PostResponse {
    let response = client
        .post("/api/v1/posts", &CreatePostRequest::in_categories(categories))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn toggle(client: &TestClient, request: &ToggleReactionRequest) -> ToggleReactionResponse {
    let response = client.post("/api/v1/reactions", request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = start().await;
    let client = server.client().unwrap();

    let response = client.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = client.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = start().await;
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    let response = client.post("/api/v1/auth/register", &request).await.unwrap();
    assert!(session_cookie(&response).is_none(), "registration does not sign in");
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert!(!user.created_at.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = start().await;
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    let response = client.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same email, different username
    let again = RegisterRequest {
        username: format!("{}x", request.username),
        ..request.clone()
    };
    let response = client.post("/api/v1/auth/register", &again).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_IDENTITY");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let server = start().await;
    let client = server.client().unwrap();

    let weak = RegisterRequest {
        password: "short".to_string(),
        ..RegisterRequest::unique()
    };
    let response = client.post("/api/v1/auth/register", &weak).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let bad_email = RegisterRequest {
        email: "not-an-email".to_string(),
        ..RegisterRequest::unique()
    };
    let response = client.post("/api/v1/auth/register", &bad_email).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let server = start().await;
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();
    client.post("/api/v1/auth/register", &request).await.unwrap();

    let response = client
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();

    let header = session_set_cookie_header(&response).expect("session cookie set");
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Path=/"));
    assert!(header.contains("Expires="));

    let token = session_cookie(&response).unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.email, request.email);
    assert!(!login.expires_at.is_empty());
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = start().await;
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();
    client.post("/api/v1/auth/register", &request).await.unwrap();

    let wrong_password = LoginRequest {
        email: request.email.clone(),
        password: "WrongPass999!".to_string(),
    };
    let unknown_email = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: request.password.clone(),
    };

    let mut bodies = Vec::new();
    for attempt in [&wrong_password, &unknown_email] {
        let response = client.post("/api/v1/auth/login", attempt).await.unwrap();
        assert!(session_cookie(&response).is_none());
        let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        bodies.push((body.error.code, body.error.message));
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].0, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_requires_session() {
    let server = start().await;
    let client = server.client().unwrap();

    let response = client.get("/api/v1/auth/me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "UNAUTHENTICATED");

    let (request, _) = sign_up(&client).await;
    let response = client.get("/api/v1/auth/me").await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, request.username);
}

#[tokio::test]
async fn test_new_login_invalidates_previous_session() {
    let server = start().await;
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();
    client.post("/api/v1/auth/register", &request).await.unwrap();
    let login = LoginRequest::from_register(&request);

    let first = client.post("/api/v1/auth/login", &login).await.unwrap();
    let first_token = session_cookie(&first).unwrap();
    let second = client.post("/api/v1/auth/login", &login).await.unwrap();
    let second_token = session_cookie(&second).unwrap();
    assert_ne!(first_token, second_token);

    let response = client
        .get_with_token("/api/v1/auth/me", &first_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = client
        .get_with_token("/api/v1/auth/me", &second_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout() {
    let server = start().await;
    let client = server.client().unwrap();

    // Logging out without a session is fine
    let response = client.post_empty("/api/v1/auth/logout").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let (request, _) = sign_up(&client).await;
    let relogin = client
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let token = session_cookie(&relogin).unwrap();

    let response = client.post_empty("/api/v1/auth/logout").await.unwrap();
    let cleared = session_set_cookie_header(&response).expect("cookie cleared");
    assert!(cleared.contains("Max-Age=0") || cleared.contains("Expires="));
    assert!(cleared.contains("HttpOnly"));
    assert!(cleared.contains("SameSite=Lax"));
    assert!(cleared.contains("Path=/"));
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = client.get("/api/v1/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // The revoked token stays dead even when presented explicitly
    let response = client
        .get_with_token("/api/v1/auth/me", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Category & Post Tests
// ============================================================================

#[tokio::test]
async fn test_list_categories() {
    let server = start().await;
    let client = server.client().unwrap();

    let response = client.get("/api/v1/categories").await.unwrap();
    let categories: Vec<CategoryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(categories.len(), 5);
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(categories.iter().any(|c| c.slug == "help"));
}

#[tokio::test]
async fn test_create_post_requires_session() {
    let server = start().await;
    let client = server.client().unwrap();

    let response = client
        .post("/api/v1/posts", &CreatePostRequest::in_categories(&["general"]))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_create_and_get_post() {
    let server = start().await;
    let client = server.client().unwrap();
    let (_, user) = sign_up(&client).await;

    let post = create_post(&client, &["help", "general", "help"]).await;
    assert_eq!(post.author.id, user.id);
    let slugs: Vec<&str> = post.categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["general", "help"]);
    assert_eq!((post.like_count, post.dislike_count), (0, 0));

    // Anonymous readers see the post without a personal reaction
    let anonymous = server.client().unwrap();
    let response = anonymous
        .get(&format!("/api/v1/posts/{}", post.id))
        .await
        .unwrap();
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.post.title, post.title);
    assert!(detail.comments.is_empty());
    assert_eq!(detail.post.my_reaction, None);
}

#[tokio::test]
async fn test_post_errors() {
    let server = start().await;
    let client = server.client().unwrap();
    sign_up(&client).await;

    let response = client
        .post("/api/v1/posts", &CreatePostRequest::in_categories(&["nope"]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_CATEGORY");

    let response = client.get("/api/v1/posts/9999").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let response = client.get("/api/v1/posts/abc").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = client.get("/api/v1/posts?filter=popular").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_list_posts_with_filters() {
    let server = start().await;
    let alice = server.client().unwrap();
    let bob = server.client().unwrap();
    sign_up(&alice).await;
    sign_up(&bob).await;

    let help = create_post(&alice, &["help"]).await;
    let random = create_post(&alice, &["random"]).await;
    let bobs = create_post(&bob, &["help"]).await;
    toggle(&alice, &ToggleReactionRequest::post(bobs.id, 1)).await;

    let ids = |posts: Vec<PostResponse>| posts.into_iter().map(|p| p.id).collect::<Vec<_>>();

    let response = alice.get("/api/v1/posts").await.unwrap();
    let all: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(all), vec![bobs.id, random.id, help.id]);

    let response = alice.get("/api/v1/posts?category=help").await.unwrap();
    let in_help: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(in_help), vec![bobs.id, help.id]);

    let response = alice.get("/api/v1/posts?filter=mine").await.unwrap();
    let mine: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(mine), vec![random.id, help.id]);

    let response = alice.get("/api/v1/posts?filter=liked").await.unwrap();
    let liked: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.len(), 1);
    assert_eq!(liked[0].id, bobs.id);
    assert_eq!(liked[0].my_reaction, Some(1));

    let response = alice.get("/api/v1/posts?limit=1&offset=1").await.unwrap();
    let page: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(page), vec![random.id]);

    // Personal filters need a signed-in viewer; anonymous callers get everything
    let anonymous = server.client().unwrap();
    let response = anonymous.get("/api/v1/posts?filter=mine").await.unwrap();
    let everything: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(everything.len(), 3);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comments() {
    let server = start().await;
    let client = server.client().unwrap();
    sign_up(&client).await;
    let post = create_post(&client, &["general"]).await;
    let path = format!("/api/v1/posts/{}/comments", post.id);

    for body in ["first", "second"] {
        let response = client
            .post(&path, &CreateCommentRequest { body: body.to_string() })
            .await
            .unwrap();
        let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment.body, body);
    }

    let anonymous = server.client().unwrap();
    let response = anonymous.get(&path).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let bodies: Vec<&str> = comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second"]);

    let response = anonymous
        .post(&path, &CreateCommentRequest { body: "drive-by".to_string() })
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = client
        .post(
            "/api/v1/posts/9999/comments",
            &CreateCommentRequest { body: "lost".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = client
        .post(&path, &CreateCommentRequest { body: "   ".to_string() })
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_sequence() {
    let server = start().await;
    let client = server.client().unwrap();
    sign_up(&client).await;
    let post = create_post(&client, &["general"]).await;

    let liked = toggle(&client, &ToggleReactionRequest::post(post.id, 1)).await;
    assert_eq!(liked.outcome, "created");
    assert_eq!((liked.like_count, liked.dislike_count), (1, 0));
    assert_eq!(liked.my_reaction, Some(1));

    let flipped = toggle(&client, &ToggleReactionRequest::post(post.id, -1)).await;
    assert_eq!(flipped.outcome, "updated");
    assert_eq!((flipped.like_count, flipped.dislike_count), (0, 1));
    assert_eq!(flipped.my_reaction, Some(-1));

    let withdrawn = toggle(&client, &ToggleReactionRequest::post(post.id, -1)).await;
    assert_eq!(withdrawn.outcome, "removed");
    assert_eq!((withdrawn.like_count, withdrawn.dislike_count), (0, 0));
    assert_eq!(withdrawn.my_reaction, None);
}

#[tokio::test]
async fn test_reaction_summary() {
    let server = start().await;
    let author = server.client().unwrap();
    let fan = server.client().unwrap();
    sign_up(&author).await;
    sign_up(&fan).await;

    let post = create_post(&author, &["general"]).await;
    let response = author
        .post(
            &format!("/api/v1/posts/{}/comments", post.id),
            &CreateCommentRequest { body: "nice".to_string() },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    toggle(&fan, &ToggleReactionRequest::comment(comment.id, -1)).await;
    toggle(&author, &ToggleReactionRequest::comment(comment.id, 1)).await;

    let path = format!("/api/v1/reactions/comment/{}", comment.id);

    let response = fan.get(&path).await.unwrap();
    let summary: ReactionSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.target_type, "comment");
    assert_eq!(summary.target_id, comment.id);
    assert_eq!((summary.like_count, summary.dislike_count), (1, 1));
    assert_eq!(summary.my_reaction, Some(-1));

    let anonymous = server.client().unwrap();
    let response = anonymous.get(&path).await.unwrap();
    let summary: ReactionSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.my_reaction, None);

    // A post and a comment with the same id keep separate totals
    let response = anonymous
        .get(&format!("/api/v1/reactions/post/{}", post.id))
        .await
        .unwrap();
    let post_summary: ReactionSummaryResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((post_summary.like_count, post_summary.dislike_count), (0, 0));
}

#[tokio::test]
async fn test_reaction_errors() {
    let server = start().await;
    let client = server.client().unwrap();

    let response = client
        .post("/api/v1/reactions", &ToggleReactionRequest::post(1, 1))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    sign_up(&client).await;
    let post = create_post(&client, &["general"]).await;

    let response = client
        .post("/api/v1/reactions", &ToggleReactionRequest::post(post.id, 2))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACTION_VALUE");

    let response = client
        .post(
            "/api/v1/reactions",
            &ToggleReactionRequest {
                target_type: "user".to_string(),
                target_id: post.id,
                value: 1,
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_TARGET_TYPE");

    let response = client
        .post("/api/v1/reactions", &ToggleReactionRequest::comment(9999, 1))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_TARGET");

    let response = client.get("/api/v1/reactions/user/1").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_toggles_stay_consistent() {
    let server = start().await;
    let client = server.client().unwrap();
    sign_up(&client).await;
    let post = create_post(&client, &["general"]).await;

    let request = ToggleReactionRequest::post(post.id, 1);
    let results = join_all((0..10).map(|_| client.post("/api/v1/reactions", &request))).await;

    let mut outcomes = Vec::new();
    for result in results {
        let body: ToggleReactionResponse =
            assert_json(result.unwrap(), StatusCode::OK).await.unwrap();
        outcomes.push(body.outcome);
    }
    let created = outcomes.iter().filter(|o| *o == "created").count();
    let removed = outcomes.iter().filter(|o| *o == "removed").count();
    assert_eq!(created + removed, 10);
    assert_eq!(created, removed, "ten toggles of one value cancel out");

    let response = client
        .get(&format!("/api/v1/reactions/post/{}", post.id))
        .await
        .unwrap();
    let summary: ReactionSummaryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((summary.like_count, summary.dislike_count), (0, 0));
    assert_eq!(summary.my_reaction, None);
}

#[tokio::test]
async fn test_concurrent_users_are_all_counted() {
    let server = start().await;
    let author = server.client().unwrap();
    sign_up(&author).await;
    let post = create_post(&author, &["general"]).await;

    let mut fans = Vec::new();
    for _ in 0..4 {
        let fan = server.client().unwrap();
        sign_up(&fan).await;
        fans.push(fan);
    }

    let like = ToggleReactionRequest::post(post.id, 1);
    let results = join_all(fans.iter().map(|fan| fan.post("/api/v1/reactions", &like))).await;
    for result in results {
        assert_status(result.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = author
        .get(&format!("/api/v1/posts/{}", post.id))
        .await
        .unwrap();
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.post.like_count, 4);
    assert_eq!(detail.post.my_reaction, None);
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_graceful_stop() {
    let server = start().await;
    let client = server.client().unwrap();
    let response = client.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.stop().await.unwrap();
    assert!(client.get("/health").await.is_err());
}
