//! Router assembly
//!
//! ```text
//! /api/auth/signup        POST  public
//! /api/auth/login         POST  public
//! /api/auth/logout        POST  public
//! /api/detection/analyze  POST  require_auth
//! /api/detection/health   GET   public
//! ```

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, auth_router, require_auth};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use detection::{Classifier, DetectionAppState, analyze_router, health_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn build_router<R, C>(
    auth_state: AuthAppState<R>,
    detection_state: DetectionAppState<C>,
    cors: CorsLayer,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: Classifier + Send + Sync + 'static,
{
    let detection = analyze_router(detection_state)
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth::<R>,
        ))
        .merge(health_router());

    Router::new()
        .nest("/api/auth", auth_router(auth_state))
        .nest("/api/detection", detection)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the browser client: listed origins, cookies allowed
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{AuthConfig, InMemoryUserRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use detection::{DetectionConfig, DetectionResult, Prediction};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const ORIGIN: &str = "http://localhost:5173";

    #[derive(Clone, Default)]
    struct FakeLabelClassifier {
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for FakeLabelClassifier {
        async fn classify(&self, _text: &str) -> DetectionResult<Prediction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Prediction::new("LABEL_0", 0.91))
        }
    }

    fn app(classifier: FakeLabelClassifier) -> Router {
        build_router(
            AuthAppState::new(InMemoryUserRepository::new(), AuthConfig::development()),
            DetectionAppState::new(classifier, DetectionConfig::default()),
            cors_layer(&[ORIGIN.to_string()]),
        )
    }

    fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_requires_session() {
        let classifier = FakeLabelClassifier::default();

        let res = app(classifier.clone())
            .oneshot(post_json(
                "/api/detection/analyze",
                json!({ "text": "Some headline" }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["message"], "Not authorized, no token");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_signup_then_analyze() {
        let classifier = FakeLabelClassifier::default();
        let app = app(classifier.clone());

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/auth/signup",
                json!({ "username": "reader", "password": "CorrectHorse1!" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let res = app
            .oneshot(post_json(
                "/api/detection/analyze",
                json!({ "text": "Some headline" }),
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["data"]["isFake"], true);
        assert_eq!(body["data"]["label"], "FAKE");
        assert_eq!(body["data"]["confidence"], 0.91);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let res = app(FakeLabelClassifier::default())
            .oneshot(
                Request::builder()
                    .uri("/api/detection/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let res = app(FakeLabelClassifier::default())
            .oneshot(
                Request::builder()
                    .uri("/api/detection/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let res = app(FakeLabelClassifier::default())
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/detection/analyze")
                    .header(header::ORIGIN, ORIGIN)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let res = app(FakeLabelClassifier::default())
            .oneshot(
                Request::builder()
                    .uri("/api/detection/health")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
