use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use cf_core::{ArticleInput, Error, ExamType, QueuedArticle, SubmitPayload, WebhookClient};
use cf_webhook::{HttpWebhook, WebhookConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Recorded {
    requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/webhook/upsc", addr)
}

fn payload() -> SubmitPayload {
    SubmitPayload::new(
        vec![QueuedArticle::new(
            "A",
            ArticleInput::Url("http://x".to_string()),
            ExamType::Prelims,
            None,
            None,
        )],
        None,
    )
}

fn client(url: &str, api_key: Option<&str>) -> HttpWebhook {
    let config = WebhookConfig::new(Some(url), api_key.map(str::to_string)).unwrap();
    HttpWebhook::new(&config).unwrap()
}

#[tokio::test]
async fn test_success_decodes_result_and_sends_headers() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/webhook/upsc",
            post(|State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>| async move {
                rec.requests.lock().unwrap().push((headers, body));
                Json(json!({
                    "url": "https://docs.example/doc1",
                    "articles": [{"title": "A", "html": "<p>hi</p>", "markdown": "hi"}]
                }))
            }),
        )
        .with_state(recorded.clone());
    let url = spawn(app).await;

    let result = client(&url, Some("s3cret")).submit(&payload()).await.unwrap();
    assert_eq!(result.document_link(), Some("https://docs.example/doc1"));
    assert_eq!(result.articles.len(), 1);
    assert_eq!(result.articles[0].html(), "<p>hi</p>");

    let requests = recorded.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (headers, body) = &requests[0];
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["x-api-key"], "s3cret");
    assert_eq!(body["articles"][0]["title"], "A");
    assert_eq!(body["articles"][0]["url"], "http://x");
    assert_eq!(body["articles"][0]["raw_text"], "");
    assert!(body.get("options").is_none());
}

#[tokio::test]
async fn test_api_key_header_omitted_when_unset() {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/webhook/upsc",
            post(|State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>| async move {
                rec.requests.lock().unwrap().push((headers, body));
                Json(json!({}))
            }),
        )
        .with_state(recorded.clone());
    let url = spawn(app).await;

    client(&url, None).submit(&payload()).await.unwrap();
    let requests = recorded.requests.lock().unwrap();
    assert!(requests[0].0.get("x-api-key").is_none());
}

#[tokio::test]
async fn test_non_200_surfaces_status_and_body() {
    let app = Router::new().route(
        "/webhook/upsc",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "workflow failed at node Gemini") }),
    );
    let url = spawn(app).await;

    let err = client(&url, None).submit(&payload()).await.unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "workflow failed at node Gemini");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_success_codes_are_errors() {
    let app = Router::new().route("/webhook/upsc", post(|| async { (StatusCode::ACCEPTED, "{}") }));
    let url = spawn(app).await;

    let err = client(&url, None).submit(&payload()).await.unwrap_err();
    assert_eq!(err.status(), Some(202));
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let app = Router::new().route("/webhook/upsc", post(|| async { "<html>ok</html>" }));
    let url = spawn(app).await;

    let err = client(&url, None).submit(&payload()).await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_slow_workflow_times_out() {
    let app = Router::new().route(
        "/webhook/upsc",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let url = spawn(app).await;

    let config = WebhookConfig::new(Some(&url), None)
        .unwrap()
        .with_timeout_secs(1)
        .unwrap();
    let err = HttpWebhook::new(&config).unwrap().submit(&payload()).await.unwrap_err();
    assert!(matches!(err, Error::Timeout(1)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/hook", addr), None)
        .submit(&payload())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
