use axum::{body::Body, http::Request};
use obligo_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

#[tokio::test]
async fn health_works() {
    let tmp = tempdir().unwrap();
    std::env::set_var("OB_DB_PATH", tmp.path().join("test.db"));
    std::env::set_var("OB_DATA_ROOT", tmp.path());
    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}
