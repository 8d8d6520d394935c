use std::path::PathBuf;
use std::sync::Arc;

use scribe_engine::{
    CookieCsrfProvider, FailureKind, ReqwestUploader, StaticCsrfToken, StoredImage,
    UploadSettings, Uploader,
};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUCCESS_BODY: &str = r#"{"state":1,"data":{"cloudflare":{"domain":"https://cdn.example.com"},"lPage":[{"name":"abc.png"}]}}"#;

fn image_file(dir: &TempDir, name: &str) -> PathBuf {
    let file = dir.path().join(name);
    std::fs::write(&file, b"\x89PNG fake image bytes").unwrap();
    file
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn uploader(server: &MockServer, cookie: Option<&str>) -> ReqwestUploader {
    let settings = UploadSettings {
        base_url: server.uri(),
        cookie: cookie.map(str::to_string),
        ..UploadSettings::default()
    };
    let csrf = CookieCsrfProvider::new(cookie.unwrap_or_default());
    ReqwestUploader::new(settings, Arc::new(csrf)).unwrap()
}

#[tokio::test]
async fn posts_multipart_with_headers_and_parses_ack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/"))
        .and(header("X-CSRFToken", "tok-123"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("Cookie", "sessionid=s1; csrftoken=tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SUCCESS_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = image_file(&dir, "a.png");
    let uploader = uploader(&server, Some("sessionid=s1; csrftoken=tok-123"));

    let image = uploader
        .upload(&file, "a.png", "/static/images/2024/")
        .await
        .expect("upload ok");
    assert_eq!(
        image,
        StoredImage {
            domain: "https://cdn.example.com".to_string(),
            name: "abc.png".to_string(),
        }
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = &requests[0].body;
    assert!(contains(body, br#"name="file"; filename="a.png""#));
    assert!(contains(&body.to_ascii_lowercase(), b"content-type: image/png"));
    assert!(contains(body, b"\x89PNG fake image bytes"));
    assert!(contains(body, br#"name="path""#));
    assert!(contains(body, b"/static/images/2024/"));
}

#[tokio::test]
async fn missing_token_sends_empty_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SUCCESS_BODY, "application/json"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = image_file(&dir, "a.png");
    let settings = UploadSettings {
        base_url: server.uri(),
        ..UploadSettings::default()
    };
    let uploader = ReqwestUploader::new(settings, Arc::new(StaticCsrfToken(None))).unwrap();
    uploader
        .upload(&file, "a.png", "/static/images/2024/")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let token = requests[0].headers.get("x-csrftoken").expect("header sent");
    assert_eq!(token.to_str().unwrap(), "");
    assert!(requests[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"state":0,"message":"quota exceeded"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = image_file(&dir, "a.png");
    let err = uploader(&server, None)
        .upload(&file, "a.png", "/static/images/2024/")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.to_string(), "upload failed: quota exceeded");
}

#[tokio::test]
async fn http_error_with_json_body_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/"))
        .respond_with(ResponseTemplate::new(403).set_body_raw(r#"{"state":1}"#, "application/json"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = image_file(&dir, "a.png");
    let err = uploader(&server, None)
        .upload(&file, "a.png", "/static/images/2024/")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(403));
    assert_eq!(err.message, "upload failed: unknown error");
}

#[tokio::test]
async fn non_json_error_page_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/upload/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = image_file(&dir, "a.png");
    let err = uploader(&server, None)
        .upload(&file, "a.png", "/static/images/2024/")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let err = uploader(&server, None)
        .upload(&dir.path().join("gone.png"), "gone.png", "/static/images/2024/")
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Io);
    assert!(server.received_requests().await.unwrap().is_empty());
}
