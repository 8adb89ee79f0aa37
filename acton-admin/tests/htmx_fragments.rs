//! Widgets served as HTMX partials through an axum router

use std::sync::Arc;

use acton_admin::prelude::*;
use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;

async fn status_field(State(env): State<Arc<WidgetEnv>>) -> Result<SafeHtml, StatusCode> {
    let widget = AdminRadioSelect::new(Some(Attrs::new().with("id", "id_status")))
        .with_choices([("draft", "Draft"), ("live", "Live")]);
    env.render(&widget, "status", &"draft".into(), None)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn app() -> Router {
    let env = WidgetEnv::new(WidgetConfig::default()).expect("env builds");
    Router::new()
        .route("/fields/status", get(status_field))
        .with_state(Arc::new(env))
}

#[tokio::test]
async fn test_widget_fragment_response() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/fields/status")
                .header("HX-Request", "true")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let html = String::from_utf8(body.to_vec()).expect("utf-8 body");
    assert_eq!(
        html,
        concat!(
            r#"<div class="radio"><label for="id_status_0"><input checked="checked" id="id_status_0" name="status" type="radio" value="draft" /> Draft</label></div>"#,
            "\n",
            r#"<div class="radio"><label for="id_status_1"><input id="id_status_1" name="status" type="radio" value="live" /> Live</label></div>"#
        )
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/fields/missing")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
