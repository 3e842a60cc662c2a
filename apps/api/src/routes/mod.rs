pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::analysis::handlers as analysis;
use crate::config::Config;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/extract", post(extraction::handle_extract))
        .route("/analyze", post(analysis::handle_analyze))
        .route("/roadmap", post(analysis::handle_roadmap))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Only the configured frontend origin may call the API, with credentials.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let origin: HeaderValue = config
        .frontend_url
        .trim_end_matches('/')
        .parse()
        .with_context(|| format!("FRONTEND_URL '{}' is not a valid origin", config.frontend_url))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::orchestrator::Analyzer;
    use crate::extraction::{
        ExtractionError, ExtractionPipeline, OcrEngine, PageImage, PageRasterizer,
        RasterizedDocument, TextLayerExtractor,
    };

    const BOUNDARY: &str = "X-TEST-BOUNDARY";

    /// Treats the uploaded bytes as the text layer itself.
    struct EchoTextLayer;

    impl TextLayerExtractor for EchoTextLayer {
        fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(vec![String::from_utf8_lossy(bytes).into_owned()])
        }
    }

    struct NoRasterizer;

    impl PageRasterizer for NoRasterizer {
        fn rasterize(&self, _bytes: &[u8]) -> Result<RasterizedDocument, ExtractionError> {
            Err(ExtractionError::Rasterize("unavailable in tests".to_string()))
        }
    }

    struct NoOcr;

    impl OcrEngine for NoOcr {
        fn recognize(&self, image: &PageImage) -> Result<String, ExtractionError> {
            Err(ExtractionError::Ocr {
                page: image.page_number,
                message: "unavailable in tests".to_string(),
            })
        }
    }

    fn test_app() -> Router {
        let state = AppState {
            config: Config::default(),
            analyzer: Arc::new(Analyzer::default()),
            extractor: Arc::new(ExtractionPipeline::new(
                Arc::new(EchoTextLayer),
                Arc::new(NoRasterizer),
                Arc::new(NoOcr),
                true,
            )),
        };
        build_router(state)
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(name, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_with_text_uses_baseline() {
        let request = multipart_request(
            "/analyze",
            &[
                Part::Text("resumeText", "I know Python and SQL"),
                Part::Text("jobDesc", "  Python SQL Docker  "),
            ],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_score"], 67);
        assert_eq!(body["missing_keywords"], serde_json::json!(["docker"]));
        assert_eq!(
            body["analysis"],
            "Approximate match based on keyword overlap: 67%."
        );
    }

    #[tokio::test]
    async fn test_analyze_without_job_desc_scores_zero() {
        let request = multipart_request("/analyze", &[Part::Text("resumeText", "Rust")]);
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_score"], 0);
        assert_eq!(body["suggestions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_analyze_requires_resume() {
        let request = multipart_request("/analyze", &[Part::Text("jobDesc", "Rust")]);
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Provide resumeFile or resumeText.");
    }

    #[tokio::test]
    async fn test_analyze_empty_text_counts_as_missing() {
        let request = multipart_request("/analyze", &[Part::Text("resumeText", "")]);
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Provide resumeFile or resumeText.");
    }

    #[tokio::test]
    async fn test_analyze_blank_text_is_rejected() {
        let request = multipart_request("/analyze", &[Part::Text("resumeText", "   ")]);
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Could not extract resume text. Try another file."
        );
    }

    #[tokio::test]
    async fn test_analyze_prefers_extracted_file_text() {
        let request = multipart_request(
            "/analyze",
            &[
                Part::File("resumeFile", "application/pdf", b"docker kubernetes"),
                Part::Text("resumeText", "nothing useful"),
                Part::Text("jobDesc", "Docker Kubernetes"),
            ],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match_score"], 100);
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_pdf_upload() {
        let request = multipart_request(
            "/analyze",
            &[Part::File("resumeFile", "image/png", b"\x89PNG")],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Only PDF files are supported.");
    }

    #[tokio::test]
    async fn test_roadmap_without_provider() {
        let request = multipart_request(
            "/roadmap",
            &[
                Part::Text("resumeText", "I know Python and SQL"),
                Part::Text("jobDesc", "Python SQL Docker"),
            ],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skill_gaps"], serde_json::json!(["docker"]));
        assert_eq!(body["roadmap"][0]["duration"], "8-12 weeks");
    }

    #[tokio::test]
    async fn test_extract_returns_text() {
        let request = multipart_request(
            "/extract",
            &[Part::File(
                "resumeFile",
                "application/octet-stream",
                b"  Jane Doe, Rust  ",
            )],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Jane Doe, Rust");
    }

    #[tokio::test]
    async fn test_extract_without_text_is_422() {
        let request = multipart_request(
            "/extract",
            &[Part::File("resumeFile", "application/pdf", b"   \n  ")],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["detail"],
            "Could not extract text from the provided PDF."
        );
    }

    #[tokio::test]
    async fn test_extract_empty_file_is_400() {
        let request = multipart_request(
            "/extract",
            &[Part::File("resumeFile", "application/pdf", b"")],
        );
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Empty file received.");
    }

    #[tokio::test]
    async fn test_extract_requires_file() {
        let request = multipart_request("/extract", &[Part::Text("resumeText", "hi")]);
        let (status, _) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_layer_accepts_frontend_origin() {
        assert!(cors_layer(&Config::default()).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let config = Config {
            frontend_url: "http://bad\norigin".to_string(),
            ..Config::default()
        };
        assert!(cors_layer(&config).is_err());
    }

    #[tokio::test]
    async fn test_cors_preflight_echoes_origin() {
        let app = test_app().layer(cors_layer(&Config::default()).unwrap());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
    }
}
