//! Authentication handlers
//!
//! Endpoints for registration, login, logout and the current user.
//! The session token travels only in an HttpOnly cookie.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use forum_service::dto::{CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest};
use forum_service::AuthService;
use time::OffsetDateTime;

use crate::extractors::{AuthUser, SessionCookie, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<CurrentUserResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(user)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let service = AuthService::new(state.service_context());
    let outcome = service.login(request).await?;

    let cookie = session_cookie(&state, outcome.token.as_str().to_owned(), outcome.expires_at)?;
    Ok((jar.add(cookie), Json(outcome.response())))
}

/// Logout, revoking the presented session if there is one
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    session: SessionCookie,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AuthService::new(state.service_context());
    service.logout(session.token()).await?;

    let removal = base_cookie(&state, String::new());
    Ok((jar.remove(removal), NoContent))
}

/// The signed-in user
///
/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(state.service_context());
    let user = service.me(auth.identity()).await?;
    Ok(Json(user))
}

fn session_cookie(
    state: &AppState,
    token: String,
    expires_at: DateTime<Utc>,
) -> ApiResult<Cookie<'static>> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map_err(ApiError::internal)?;

    let mut cookie = base_cookie(state, token);
    cookie.set_expires(expires);
    Ok(cookie)
}

/// Session cookie attributes shared by login and logout
fn base_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_owned(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies())
        .build()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::server::create_app;
    use crate::state::test_support::test_state_with;

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn set_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }

    async fn production_app() -> Router {
        create_app(test_state_with(&[("APP_ENV", "production")]).await)
    }

    #[tokio::test]
    async fn test_logout_clears_cookie_with_login_attributes() {
        let app = production_app().await;

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/v1/auth/register",
                r#"{"email":"c@example.com","username":"carol","password":"pw123456"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_post(
                "/api/v1/auth/login",
                r#"{"email":"c@example.com","password":"pw123456"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let issued = set_cookie(&response);
        let pair = issued.split(';').next().unwrap().to_owned();

        let response = app
            .oneshot(
                Request::post("/api/v1/auth/logout")
                    .header(header::COOKIE, pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let cleared = set_cookie(&response);
        for attribute in ["HttpOnly", "SameSite=Lax", "Secure", "Path=/"] {
            assert!(issued.contains(attribute), "login cookie lacks {attribute}: {issued}");
            assert!(cleared.contains(attribute), "logout cookie lacks {attribute}: {cleared}");
        }
        assert!(cleared.contains("Max-Age=0"));
    }
}
