use link_summarizer::{AppState, api::routes::create_router, config::Config};
use link_summarizer::analyzer::{MAX_URLS_PER_REQUEST, UNREACHABLE_SUMMARY};
use link_summarizer::llm::NO_API_KEY_SUMMARY;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(gemini_api_key: Option<&str>, gemini_api_url: String) -> String {
    let state = AppState::new(Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        gemini_api_key: gemini_api_key.map(str::to_string),
        gemini_api_url,
    })
    .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><style>p{}</style></head><body><p>Rust   news</p></body></html>",
        ))
        .mount(&server)
        .await;
    server
}

async fn post_analyze(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/analyze", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn only_first_ten_urls_are_analyzed() {
    let pages = page_server().await;
    let base = spawn_app(None, "http://127.0.0.1:1".to_string()).await;

    let urls: Vec<String> = (0..13).map(|i| format!("{}/page/{}", pages.uri(), i)).collect();
    let (status, body) = post_analyze(&base, json!({ "urls": urls })).await;
    assert_eq!(status, 200);

    let results = body["results"].as_object().unwrap();
    assert_eq!(results.len(), MAX_URLS_PER_REQUEST);
    for url in &urls[..MAX_URLS_PER_REQUEST] {
        assert_eq!(results[url]["status"], "success");
        assert_eq!(results[url]["summary"], NO_API_KEY_SUMMARY);
    }
    for url in &urls[MAX_URLS_PER_REQUEST..] {
        assert!(!results.contains_key(url));
    }
}

#[tokio::test]
async fn failing_url_does_not_affect_the_rest() {
    let pages = page_server().await;
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{
                "text": "Daily   news about the Rust programming language"
            }] } }]
        })))
        .mount(&api)
        .await;
    let base = spawn_app(Some("secret"), api.uri()).await;

    let good = format!("{}/news", pages.uri());
    let bad = "http://127.0.0.1:1/offline".to_string();
    let (status, body) =
        post_analyze(&base, json!({ "urls": [good.clone(), bad.clone(), good.clone()] })).await;
    assert_eq!(status, 200);

    let results = body["results"].as_object().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[&good],
        json!({ "status": "success", "summary": "Daily news about the Rust programming language" })
    );
    assert_eq!(results[&bad]["status"], "error");
    assert_eq!(results[&bad]["summary"], UNREACHABLE_SUMMARY);
    assert!(results[&bad]["error"].is_string());
}

#[tokio::test]
async fn non_array_urls_are_rejected() {
    let base = spawn_app(None, "http://127.0.0.1:1".to_string()).await;

    let (status, body) = post_analyze(&base, json!({ "urls": 7 })).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
    assert!(body.get("results").is_none());
}
