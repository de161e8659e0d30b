//! End-to-end relay against a fake streaming model endpoint.

use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use listdesk_ocr::relay::PROGRESS_MESSAGE;
use listdesk_ocr::{spawn_relay, GeminiClient, GeminiConfig, ImageInput, OcrEvent};

async fn spawn_model(status: StatusCode, body: &'static str) -> GeminiClient {
    let app = Router::new().route(
        "/v1beta/models/{model}",
        post(move |uri: Uri| async move {
            assert!(uri.path().ends_with(":streamGenerateContent"));
            assert_eq!(uri.query(), Some("alt=sse"));
            (status, [(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    GeminiClient::new(GeminiConfig {
        api_key: "test-key".into(),
        model: "gemini-test".into(),
        base_url: format!("http://{addr}"),
    })
}

async fn collect(client: GeminiClient) -> Vec<OcrEvent> {
    let images = vec![ImageInput::new("image/jpeg", vec![0xff, 0xd8]).unwrap()];
    let (mut rx, handle) = spawn_relay(client, images);
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    handle.await.unwrap();
    events
}

const GOOD_STREAM: &str = concat!(
    "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Looking at page one\",\"thought\":true}]}}]}\r\n\r\n",
    "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"{\\\"listing_agent\\\": \\\"Mick Knight\\\",\"}]}}]}\r\n\r\n",
    "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\" \\\"suburb\\\": \\\"Ulverstone\\\"}\"}]}}]}\r\n\r\n",
);

// ---- Test: full event sequence ----

#[tokio::test]
async fn relays_in_order_and_completes() {
    let events = collect(spawn_model(StatusCode::OK, GOOD_STREAM).await).await;

    assert_eq!(events.len(), 5);
    assert_eq!(
        events[0],
        OcrEvent::Info {
            model_id: "gemini-test".into()
        }
    );
    assert_eq!(events[1], OcrEvent::Thought("Looking at page one".into()));
    assert_eq!(events[2], OcrEvent::Progress);
    assert_eq!(events[3].data(), PROGRESS_MESSAGE);

    match &events[4] {
        OcrEvent::Complete(listing) => {
            assert_eq!(listing["listing_agent"], "MICHAEL KNIGHT");
            assert_eq!(listing["listing_agent_id"], 30118);
            assert_eq!(listing["suburb"], "Ulverstone");
        }
        other => panic!("expected complete, got {other:?}"),
    }
}

// ---- Test: output without JSON ends in error ----

#[tokio::test]
async fn non_json_output_ends_with_error() {
    let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"I cannot read this\"}]}}]}\n\n";
    let events = collect(spawn_model(StatusCode::OK, body).await).await;

    assert_eq!(events.len(), 3);
    assert_eq!(events[1], OcrEvent::Progress);
    assert_eq!(
        events[2],
        OcrEvent::Error("No listing data found in model output".into())
    );
}

// ---- Test: upstream rejection ends in error without leaking the body ----

#[tokio::test]
async fn upstream_status_ends_with_error() {
    let events = collect(spawn_model(StatusCode::FORBIDDEN, "secret detail").await).await;

    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], OcrEvent::Info { .. }));
    match &events[1] {
        OcrEvent::Error(message) => {
            assert_eq!(message, "Model API returned HTTP 403");
            assert!(!message.contains("secret"));
        }
        other => panic!("expected error, got {other:?}"),
    }
}

// ---- Test: dropped receiver stops the task ----

#[tokio::test]
async fn dropped_receiver_stops_relay() {
    let client = spawn_model(StatusCode::OK, GOOD_STREAM).await;
    let images = vec![ImageInput::new("image/png", vec![1]).unwrap()];
    let (rx, handle) = spawn_relay(client, images);
    drop(rx);
    handle.await.unwrap();
}
