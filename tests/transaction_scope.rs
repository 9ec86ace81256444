//! Transaction scope and session registry behavior
//!
//! Covers the lifecycle guarantees the rest of the server leans on: one
//! session per scope, isolation between concurrent scopes, unconditional
//! cleanup on every close path, and the middleware commit/rollback policy.

#[allow(dead_code)]
mod support;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use storefront::db::{registry, CategoryRepository, DbSession, TransactionScope};
use storefront::{AppState, Error};
use support::{rolled_back, TestApp};
use tower::ServiceExt as _;

#[tokio::test]
async fn resolver_returns_the_same_session_within_a_scope() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;

        let first = registry::current_session().expect("session bound after open");
        let second = registry::current_session().expect("session still bound");
        assert!(first.same_session(&second));
        assert_eq!(first.id(), scope.session().id());

        match db.session() {
            DbSession::Scoped(session) => assert!(session.same_session(&first)),
            DbSession::Pool(_) => panic!("expected a scoped session"),
        }

        scope.rollback().await;
        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn open_requires_a_session_context() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    assert!(!registry::in_session_context());

    let err = TransactionScope::open(&app.state.db)
        .await
        .expect_err("open outside any context must fail");
    assert!(matches!(err, Error::NoSessionContext));

    Ok(())
}

#[tokio::test]
async fn reentrant_open_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;

        let err = TransactionScope::open(&db)
            .await
            .expect_err("second open in the same scope must fail");
        assert!(matches!(err, Error::ScopeAlreadyActive));

        // The original binding is untouched by the failed open.
        match db.session() {
            DbSession::Scoped(session) => assert!(session.same_session(scope.session())),
            DbSession::Pool(_) => panic!("expected the original scoped session"),
        }

        scope.rollback().await;
        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn resolves_fall_back_to_the_pool_after_close() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;
        assert!(db.session().is_scoped());
        scope.commit().await?;
        assert!(!db.session().is_scoped());

        let scope = TransactionScope::open(&db).await?;
        assert!(db.session().is_scoped());
        scope.rollback().await;
        assert!(!db.session().is_scoped());

        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn rollback_and_clear_are_idempotent() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;
        let session = scope.session().clone();

        scope.rollback().await;
        assert!(registry::current_session().is_none());
        assert!(!session.is_open().await);

        // A second rollback against the closed session is a no-op, and so is
        // clearing the already-cleared binding.
        session.rollback().await;
        registry::clear_session();
        assert!(registry::current_session().is_none());

        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn rolled_back_writes_are_invisible_to_the_next_scope() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;
        let repo = db.repository::<CategoryRepository>();
        repo.insert("Ephemeral", None).await?;
        assert!(repo.find_by_name("Ephemeral").await?.is_some());
        scope.rollback().await;
        Ok::<_, anyhow::Error>(())
    })
    .await?;

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;
        let repo = db.repository::<CategoryRepository>();
        assert!(repo.find_by_name("Ephemeral").await?.is_none());
        scope.rollback().await;
        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn committed_writes_are_visible_to_unscoped_resolves() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;
        let repo = db.repository::<CategoryRepository>();
        repo.insert("Durable", None).await?;
        scope.commit().await?;
        Ok::<_, anyhow::Error>(())
    })
    .await?;

    // No scope here: the repository resolves against the pool.
    let repo = db.repository::<CategoryRepository>();
    assert!(repo.find_by_name("Durable").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn uncommitted_writes_are_invisible_to_a_concurrent_scope() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    let db_a = app.state.db.clone();
    let db_b = app.state.db.clone();

    let (wrote_tx, wrote_rx) = tokio::sync::oneshot::channel::<()>();
    let (read_tx, read_rx) = tokio::sync::oneshot::channel::<()>();

    let writer = tokio::spawn(registry::with_session_context(async move {
        let scope = TransactionScope::open(&db_a).await.unwrap();
        let repo = db_a.repository::<CategoryRepository>();
        repo.insert("Contended", None).await.unwrap();

        wrote_tx.send(()).unwrap();
        read_rx.await.unwrap();

        // Our own scope still observes the write the other scope cannot see.
        assert!(repo.find_by_name("Contended").await.unwrap().is_some());
        scope.rollback().await;
    }));

    let reader = tokio::spawn(registry::with_session_context(async move {
        wrote_rx.await.unwrap();

        let scope = TransactionScope::open(&db_b).await.unwrap();
        let repo = db_b.repository::<CategoryRepository>();
        assert!(repo.find_by_name("Contended").await.unwrap().is_none());
        scope.rollback().await;

        read_tx.send(()).unwrap();
    }));

    writer.await?;
    reader.await?;

    Ok(())
}

#[tokio::test]
async fn bindings_do_not_leak_across_sibling_tasks() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;

        // A sibling task scheduled onto the same worker pool sees no binding.
        let observed = tokio::spawn(async { registry::current_session().is_some() }).await?;
        assert!(!observed);

        scope.rollback().await;
        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test]
async fn commit_failure_still_clears_the_binding_and_releases_the_session() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let db = app.state.db.clone();

    registry::with_session_context(async {
        let scope = TransactionScope::open(&db).await?;

        // Close the session out from under the scope to force the commit to fail.
        scope.session().rollback().await;

        let err = scope
            .commit()
            .await
            .expect_err("commit of a closed session must fail");
        assert!(matches!(err, Error::SessionClosed));
        assert!(registry::current_session().is_none());

        // The scope is fully retired: a new, unrelated one opens cleanly.
        let next = TransactionScope::open(&db).await?;
        let repo = db.repository::<CategoryRepository>();
        assert!(repo.find_by_name("anything").await?.is_none());
        next.rollback().await;

        Ok::<_, anyhow::Error>(())
    })
    .await
}

async fn write_then_fail(State(state): State<AppState>) -> Response {
    let repo = state.db.repository::<CategoryRepository>();
    repo.insert("Doomed", None).await.unwrap();
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn write_then_succeed(State(state): State<AppState>) -> Response {
    let repo = state.db.repository::<CategoryRepository>();
    repo.insert("Persisted", None).await.unwrap();
    StatusCode::CREATED.into_response()
}

fn scoped_router(state: AppState) -> Router {
    Router::new()
        .route("/fail", post(write_then_fail))
        .route("/succeed", post(write_then_succeed))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            storefront::api::middleware::transaction_middleware,
        ))
        .with_state(state)
}

#[tokio::test]
async fn middleware_rolls_back_when_the_handler_errors() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let router = scoped_router(app.state.clone());

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/fail")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let repo = app.state.db.repository::<CategoryRepository>();
    assert!(repo.find_by_name("Doomed").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn middleware_commits_successful_requests() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;
    let router = scoped_router(app.state.clone());

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/succeed")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let repo = app.state.db.repository::<CategoryRepository>();
    assert!(repo.find_by_name("Persisted").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn requests_join_the_ambient_test_scope() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    rolled_back(&app, |app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (status, _body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Scoped" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::CREATED, "create failed: {status}");

            // Visible inside the scope through a second request.
            let (status, body) = app
                .request(Method::GET, "/categories", None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::OK);
            let names: Vec<&str> = body["data"]
                .as_array()
                .map(|items| items.iter().filter_map(|c| c["name"].as_str()).collect())
                .unwrap_or_default();
            anyhow::ensure!(names.contains(&"Scoped"), "category missing inside scope");

            Ok(())
        })
    })
    .await?;

    // Gone once the harness rolled the scope back.
    let repo = app.state.db.repository::<CategoryRepository>();
    assert!(repo.find_by_name("Scoped").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn rolled_back_bodies_do_not_leak_between_each_other() -> anyhow::Result<()> {
    let app = TestApp::spawn().await?;

    rolled_back(&app, |app| {
        Box::pin(async move {
            let token = app.login_admin().await?;
            let (status, _) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "First Body" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::CREATED);
            Ok(())
        })
    })
    .await?;

    rolled_back(&app, |app| {
        Box::pin(async move {
            let token = app.login_admin().await?;
            let (status, body) = app
                .request(Method::GET, "/categories", None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::OK);
            let names: Vec<&str> = body["data"]
                .as_array()
                .map(|items| items.iter().filter_map(|c| c["name"].as_str()).collect())
                .unwrap_or_default();
            anyhow::ensure!(
                !names.contains(&"First Body"),
                "write from the first body leaked into the second"
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn rolled_back_cleans_up_even_when_the_body_panics() -> anyhow::Result<()> {
    use futures::FutureExt as _;

    let app = TestApp::spawn().await?;

    let outcome = std::panic::AssertUnwindSafe(rolled_back(&app, |app| {
        Box::pin(async move {
            let repo = app.state.db.repository::<CategoryRepository>();
            repo.insert("Panicky", None).await?;
            panic!("test body failure");
        })
    }))
    .catch_unwind()
    .await;
    assert!(outcome.is_err(), "the panic must propagate");

    let repo = app.state.db.repository::<CategoryRepository>();
    assert!(repo.find_by_name("Panicky").await?.is_none());

    Ok(())
}
