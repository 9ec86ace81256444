use std::future::Future;
use std::pin::Pin;

use anyhow::Context as _;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use futures::FutureExt as _;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt as _;

use storefront::{
    api::create_router,
    config::{AuthConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig},
    db::{registry, TransactionScope},
    services::user::CreateUserInput,
    AppState,
};

pub const ADMIN_EMAIL: &str = "admin@storefront.test";
pub const ADMIN_PASSWORD: &str = "123456";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    // Holds the per-test database directory alive for the app's lifetime.
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> anyhow::Result<Self> {
        init_tracing();

        let db_dir = tempfile::tempdir().context("create temp dir for test database")?;
        let db_path = db_dir.path().join("storefront.db");

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: Vec::new(),
                max_request_body_size: 1024 * 1024,
            },
            database: DatabaseConfig {
                path: db_path.display().to_string(),
                max_connections: 5,
                busy_timeout_seconds: 30,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_seconds: 3600,
            },
            logging: LoggingConfig {
                level: "storefront=info".to_string(),
                json: false,
            },
        };

        let state = AppState::new(config).await.context("initialize AppState")?;

        // Seed the admin account every test logs in with.
        state
            .users
            .create(CreateUserInput {
                name: "Admin".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
                is_admin: Some(true),
            })
            .await
            .context("seed admin user")?;

        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            _db_dir: db_dir,
        })
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json");

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = builder
            .body(match body {
                Some(value) => Body::from(serde_json::to_vec(&value)?),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("parse response body")?
        };

        Ok((status, body))
    }

    pub async fn login_admin(&self) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                Method::POST,
                "/auth/login",
                Some(serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
                None,
            )
            .await?;

        anyhow::ensure!(status == StatusCode::OK, "login failed: {status} {body}");

        body["data"]["token"]
            .as_str()
            .map(String::from)
            .context("login response carries a token")
    }
}

/// Run a test body inside a transaction scope that is rolled back
/// unconditionally, pass or fail. In-process requests issued through the
/// router join the test's scope, so their writes are rolled back too.
pub async fn rolled_back<F>(app: &TestApp, f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(&'a TestApp) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + 'a>>,
{
    registry::with_session_context(async {
        let scope = TransactionScope::open(&app.state.db).await?;

        let result = std::panic::AssertUnwindSafe(f(app)).catch_unwind().await;

        scope.rollback().await;

        match result {
            Ok(r) => r,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
    .await
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(&'a TestApp) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + 'a>>,
{
    let app = TestApp::spawn().await?;

    let result = std::panic::AssertUnwindSafe(rolled_back(&app, f))
        .catch_unwind()
        .await;
    app.state.db.close().await;

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn init_tracing() {
    use std::sync::OnceLock;
    use tracing_subscriber::prelude::*;
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "storefront=info,sqlx=warn".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
