pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/vocabularies", get(handlers::handle_vocabularies))
        .route("/api/v1/vocabularies/:role", get(handlers::handle_vocabulary))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/match/batch", post(handlers::handle_batch_match))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    const BOUNDARY: &str = "skillmatch-test-boundary";

    fn app() -> Router {
        build_router(AppState::from_config(Config::default()).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skillmatch-api");
    }

    #[tokio::test]
    async fn test_vocabularies_lists_both_roles() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/vocabularies")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["jd"]["name"], "jd");
        assert_eq!(body["resume"]["version"], 1);
        assert_eq!(body["jd"]["skills"][0], "python");
    }

    #[tokio::test]
    async fn test_single_vocabulary_by_role() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/vocabularies/resume")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "resume");

        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/vocabularies/cover-letter")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_match_returns_result() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/match")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "resume_text": "Python, Django, SQL, AWS, Docker, JavaScript, React. jane@corp.io",
                    "jd_text": "Python Django SQL AWS Docker Kubernetes MongoDB"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["match_score"], 71.43);
        assert_eq!(body["missing_skills"], json!(["kubernetes", "mongodb"]));
        assert_eq!(body["reasons"][2], "Good match");
        assert_eq!(body["candidate"]["email"], "jane@corp.io");
        assert_eq!(body["field_extractor"], "basic");
    }

    #[tokio::test]
    async fn test_match_rejects_blank_jd() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/match")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"resume_text": "Python", "jd_text": "  "}).to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_batch_ranks_and_reports_failures() {
        let request = multipart_request(
            "/api/v1/match/batch",
            &[
                ("jd_text", None, "Python, SQL, Docker, Kubernetes"),
                ("resumes", Some("weak.txt"), "SQL only"),
                ("resumes", Some("strong.txt"), "Python SQL Docker Kubernetes"),
                ("resumes", Some("photo.png"), "not a resume"),
            ],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        assert_eq!(body["rows"][0]["resume_file"], "strong.txt");
        assert_eq!(body["rows"][0]["match_score"], 100.0);
        assert_eq!(body["rows"][1]["resume_file"], "weak.txt");
        assert_eq!(body["rows"][1]["match_score"], 25.0);
        assert_eq!(body["failures"][0]["resume_file"], "photo.png");
    }

    #[tokio::test]
    async fn test_batch_csv_output() {
        let request = multipart_request(
            "/api/v1/match/batch?format=csv",
            &[
                ("jd_text", None, "Python and SQL"),
                ("resumes", Some("a.txt"), "Python"),
            ],
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.starts_with("resume_file,jd_file,candidate_name"));
        assert!(csv.contains("a.txt,job_description,a,,,,,50.0,"));
    }

    #[tokio::test]
    async fn test_batch_requires_jd_and_resumes() {
        let no_jd = multipart_request(
            "/api/v1/match/batch",
            &[("resumes", Some("a.txt"), "Python")],
        );
        assert_eq!(
            app().oneshot(no_jd).await.unwrap().status(),
            StatusCode::BAD_REQUEST
        );

        let no_resumes = multipart_request("/api/v1/match/batch", &[("jd_text", None, "Python")]);
        assert_eq!(
            app().oneshot(no_resumes).await.unwrap().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
