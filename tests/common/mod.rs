#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tower::ServiceExt;
use uuid::Uuid;

use training_tracker::agents::{AgentError, EncodedFile, PlanExtractor, RecommendationAgent};
use training_tracker::api::{create_routes, AppState};
use training_tracker::auth::JwtService;
use training_tracker::config::AppConfig;
use training_tracker::models::{ExtractedDay, PlanExtraction, RecommendationInput};
use training_tracker::store::InMemoryTrainingStore;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_only";
const BOUNDARY: &str = "training-tracker-test-boundary";

/// Extraction agent answering with a fixed day -> exercises mapping.
/// Fails like an unavailable upstream until `answer_with` is called.
pub struct StubExtractor {
    days: Mutex<Vec<ExtractedDay>>,
    pub calls: AtomicUsize,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self {
            days: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answer_with(&self, days: &[(&str, &[&str])]) {
        let extracted = days
            .iter()
            .map(|(day, exercises)| ExtractedDay {
                day: day.to_string(),
                exercises: exercises.iter().map(|e| e.to_string()).collect(),
            })
            .collect();
        *self.days.lock().unwrap() = extracted;
    }

    pub fn fail(&self) {
        self.days.lock().unwrap().clear();
    }
}

#[async_trait]
impl PlanExtractor for StubExtractor {
    async fn extract_plan(&self, _file: &EncodedFile) -> Result<PlanExtraction, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let days = self.days.lock().unwrap().clone();
        if days.is_empty() {
            return Err(AgentError::Status {
                status: 503,
                body: "extraction unavailable".to_string(),
            });
        }

        Ok(PlanExtraction {
            number_of_training_days: days.len() as u32,
            exercises_by_day: days,
        })
    }
}

/// Recommendation agent recording what it was sent
pub struct StubRecommender {
    pub calls: AtomicUsize,
    pub last_input: Mutex<Option<RecommendationInput>>,
}

impl StubRecommender {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RecommendationAgent for StubRecommender {
    async fn recommend(&self, input: &RecommendationInput) -> Result<Vec<String>, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.clone());
        Ok(vec!["Increase squat volume by one set".to_string()])
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryTrainingStore>,
    pub extractor: Arc<StubExtractor>,
    pub recommender: Arc<StubRecommender>,
    jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTrainingStore::new());
        let extractor = Arc::new(StubExtractor::new());
        let recommender = Arc::new(StubRecommender::new());
        let jwt = JwtService::new(TEST_SECRET);

        let state = AppState::new(
            store.clone(),
            extractor.clone(),
            recommender.clone(),
            &AppConfig::default(),
        );

        Self {
            router: create_routes(state, jwt.clone()),
            store,
            extractor,
            recommender,
            jwt,
        }
    }

    pub fn token(&self, user_id: Uuid) -> String {
        self.jwt
            .create_token(user_id, Some("athlete@example.com"), Some("Athlete"))
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Uuid,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user_id)))
            .header(header::CONTENT_TYPE, "application/json");

        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, user_id: Uuid) -> (StatusCode, Value) {
        self.request(Method::GET, uri, user_id, None).await
    }

    pub async fn post(&self, uri: &str, user_id: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, user_id, Some(body)).await
    }

    /// Upload a plan through the multipart import form
    pub async fn import_plan(
        &self,
        user_id: Uuid,
        name: &str,
        file: Option<&[u8]>,
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
            )
            .as_bytes(),
        );
        if let Some(bytes) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"plan.xlsx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/plans/import")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user_id)))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    pub async fn complete(
        &self,
        user_id: Uuid,
        day: &str,
        exercise: &str,
        weight: f64,
        reps: i32,
    ) -> (StatusCode, Value) {
        self.post(
            &format!("/api/workouts/{day}/complete"),
            user_id,
            serde_json::json!({ "exercise_name": exercise, "weight": weight, "reps": reps }),
        )
        .await
    }
}
