#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskmanager_api::config::ServerConfig;
use taskmanager_api::router::build_app_router;
use taskmanager_api::session::SESSION_COOKIE_NAME;
use taskmanager_api::state::AppState;
use taskmanager_db::config::{DatabaseConfig, DatabaseSection};
use taskmanager_db::models::user::{NewUser, User};
use taskmanager_db::repositories::{RegisterOutcome, UserRepo, UserStore};
use taskmanager_db::{ConnectionProvider, DbError};

// ---------------------------------------------------------------------------
// User stores
// ---------------------------------------------------------------------------

/// [`UserStore`] over a vector, with the same uniqueness rule as the
/// `users` table.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn register(&self, input: &NewUser) -> Result<RegisterOutcome, DbError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == input.username) {
            return Ok(RegisterOutcome::AlreadyExists);
        }
        let user = User {
            id: users.len() as i64 + 1,
            username: input.username.clone(),
            password: input.password.clone(),
            created_at: chrono::Utc::now(),
        };
        users.push(user.clone());
        Ok(RegisterOutcome::Inserted(user))
    }

    async fn validate(&self, username: &str, password: &str) -> Result<Option<User>, DbError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }
}

/// [`UserStore`] whose every call fails as if the database were down.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn register(&self, _input: &NewUser) -> Result<RegisterOutcome, DbError> {
        Err(DbError::Connect(sqlx::Error::PoolTimedOut))
    }

    async fn validate(&self, _username: &str, _password: &str) -> Result<Option<User>, DbError> {
        Err(DbError::Connect(sqlx::Error::PoolTimedOut))
    }
}

/// [`UserStore`] that answers only after `delay`.
pub struct SlowUserStore {
    pub delay: Duration,
}

#[async_trait]
impl UserStore for SlowUserStore {
    async fn register(&self, _input: &NewUser) -> Result<RegisterOutcome, DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(RegisterOutcome::AlreadyExists)
    }

    async fn validate(&self, _username: &str, _password: &str) -> Result<Option<User>, DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        secure_cookies: false,
    }
}

/// A provider pointed at a port nothing listens on. Lazy, so building it
/// never fails; every acquire does.
pub fn unreachable_provider() -> ConnectionProvider {
    let config = DatabaseConfig::resolve(DatabaseSection::default(), |key| match key {
        "DB_URL" => Some("postgres://127.0.0.1:1/task_db".to_string()),
        "DB_ACQUIRE_TIMEOUT_SECS" => Some("1".to_string()),
        _ => None,
    })
    .expect("test database config should resolve");
    ConnectionProvider::new(&config).expect("lazy provider should build")
}

/// Build the full application router around `users`.
///
/// Clones of the returned router share one session store, so a cookie from
/// one request is honoured by the next.
pub fn build_test_app(users: Arc<dyn UserStore>) -> Router {
    build_test_app_with_config(users, test_config())
}

pub fn build_test_app_with_config(users: Arc<dyn UserStore>, config: ServerConfig) -> Router {
    let state = AppState {
        db: unreachable_provider(),
        users,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the full application router over the real PostgreSQL-backed
/// [`UserRepo`], using the given test database pool.
pub fn build_test_app_with_pool(pool: PgPool) -> Router {
    let config = test_config();
    let db = ConnectionProvider::from_pool(pool);
    let state = AppState {
        db: db.clone(),
        users: Arc::new(UserRepo::new(db)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_with_cookie(app, uri, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body. `form` must already be encoded.
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    post_form_with_cookie(app, uri, form, None).await
}

pub async fn post_form_with_cookie(
    app: Router,
    uri: &str,
    form: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::post(uri).header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

/// The `name=value` pair of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}
