//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Entry point (login screen or redirect)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (account store)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/signup            - Sign-up page
//! POST /auth/signup            - Sign-up action
//! GET  /auth/reset-password    - Password reset page
//! POST /auth/reset-password    - Send reset email
//! POST /auth/logout            - Logout action
//!
//! # Settings (requires auth)
//! GET  /settings               - Active settings tab
//! POST /settings/tab           - Switch tab
//! POST /settings/profile       - Save profile metadata
//! POST /settings/password      - Change password
//! POST /settings/accounts      - Create ad account
//! ```

pub mod auth;
pub mod settings;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route(
            "/reset-password",
            get(auth::reset_password_page).post(auth::reset_password),
        )
        .route("/logout", post(auth::logout))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::index))
        .route("/tab", post(settings::select_tab))
        .route("/profile", post(settings::update_profile))
        .route("/password", post(settings::change_password))
        .route("/accounts", post(settings::create_account))
}

/// Create all routes for the dashboard.
///
/// Session and Sentry layers are added by the caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::entry))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/auth", auth_routes())
        .nest("/settings", settings_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the account store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.accounts().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, Response, StatusCode, header},
    };
    use tower::ServiceExt;

    use saddle_core::UserMetadata;

    use crate::testing::{FakeAccounts, FakeAuth, test_app};

    const EMAIL: &str = "ops@saddle.io";
    const PASSWORD: &str = "password1";

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    fn location(response: &Response<Body>) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn session_cookie(response: &Response<Body>) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_owned()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn registered() -> (Arc<FakeAuth>, Arc<FakeAccounts>) {
        let auth = FakeAuth::new().with_user(EMAIL, PASSWORD, UserMetadata::default());
        (Arc::new(auth), Arc::new(FakeAccounts::new()))
    }

    async fn sign_in(app: &axum::Router) -> String {
        let response = app
            .clone()
            .oneshot(post_form(
                "/auth/login",
                "email=ops%40saddle.io&password=password1&remember=on",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/settings");
        session_cookie(&response)
    }

    #[tokio::test]
    async fn test_health() {
        let (auth, accounts) = registered();
        let response = test_app(auth, accounts)
            .oneshot(get("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_readiness_reports_store_failure() {
        let app = test_app(Arc::new(FakeAuth::new()), Arc::new(FakeAccounts::new().failing()));
        let response = app.oneshot(get("/health/ready", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_entry_point_shows_login() {
        let (auth, accounts) = registered();
        let response = test_app(auth, accounts)
            .oneshot(get("/", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("action=\"/auth/login\""));
    }

    #[tokio::test]
    async fn test_settings_requires_login() {
        let (auth, accounts) = registered();
        let response = test_app(auth, accounts)
            .oneshot(get("/settings", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login");
    }

    #[tokio::test]
    async fn test_login_then_settings_shows_welcome_and_header() {
        let (auth, accounts) = registered();
        let app = test_app(auth, accounts);
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(get("/settings", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Welcome back!"));
        assert!(body.contains(EMAIL));
        assert!(body.contains("No Account"));
        assert!(body.contains("USER SETTINGS"));

        // Signed-in visitors skip the login screen.
        let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
        assert_eq!(location(&response), "/settings");
    }

    #[tokio::test]
    async fn test_login_with_empty_password_rerenders_form() {
        let (auth, accounts) = registered();
        let app = test_app(auth.clone(), accounts);
        let response = app
            .oneshot(post_form("/auth/login", "email=ops%40saddle.io&password=", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("Please enter your email and password")
        );
        assert_eq!(auth.calls("sign_in"), 0);
    }

    #[tokio::test]
    async fn test_signup_mismatch_never_reaches_service() {
        let (auth, accounts) = registered();
        let app = test_app(auth.clone(), accounts);
        let response = app
            .oneshot(post_form(
                "/auth/signup",
                "email=new%40saddle.io&password=password1&confirm=password2",
                None,
            ))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Passwords do not match"));
        assert_eq!(auth.calls("sign_up"), 0);
    }

    #[tokio::test]
    async fn test_create_account_flow() {
        let (auth, accounts) = registered();
        let app = test_app(auth, accounts.clone());
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(post_form("/settings/tab", "tab=ad_accounts", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(location(&response), "/settings");

        let response = app
            .clone()
            .oneshot(get("/settings", Some(&cookie)))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("AD ACCOUNTS"));
        assert!(body.contains("No ad accounts yet. Create one below."));

        let response = app
            .clone()
            .oneshot(post_form(
                "/settings/accounts",
                "name=Test+Co&account_type=client&marketplace=Amazon+US&currency=GBP&notes=",
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(get("/settings", Some(&cookie)))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("created successfully!"));
        assert!(body.contains("Account ID: test_co"));
        assert!(body.contains("ACTIVE"));
        assert!(body.contains("CLIENT"));

        let stored = accounts.accounts();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id.as_str(), "test_co");
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let (auth, accounts) = registered();
        let app = test_app(auth.clone(), accounts);
        let cookie = sign_in(&app).await;

        let response = app
            .clone()
            .oneshot(post_form("/auth/logout", "", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(location(&response), "/auth/login");
        assert_eq!(auth.calls("sign_out"), 1);

        let response = app.oneshot(get("/settings", Some(&cookie))).await.unwrap();
        assert_eq!(location(&response), "/auth/login");
    }
}
