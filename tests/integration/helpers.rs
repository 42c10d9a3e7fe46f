//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use repairdesk_api::AppState;
use repairdesk_api::router::build_router;
use repairdesk_core::config::{AppConfig, DatabaseBackend};
use repairdesk_database::Repositories;

/// Test application context over a fresh in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for calling services directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;

        let state = AppState::new(config, Repositories::memory());
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Create a user through the API and return its id
    pub async fn create_user(&self, email: &str, numero: &str, role: &str) -> i64 {
        let response = self.post("/api/users", user_body(email, numero, role)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "User creation failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Create a client through the API and return its id
    pub async fn create_client(&self, nom: &str, numero: &str) -> i64 {
        let response = self.post("/api/clients", client_body(nom, numero)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Client creation failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Register a machine through the API and return its id
    pub async fn create_machine(&self, body: Value) -> i64 {
        let response = self.post("/api/machines", body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Machine creation failed: {:?}",
            response.body
        );
        response.id()
    }
}

pub fn user_body(email: &str, numero: &str, role: &str) -> Value {
    json!({
        "nom": "Martin",
        "prenom": "Claire",
        "adresse": "2 avenue Foch, Lyon",
        "numero": numero,
        "email": email,
        "password": "secret1",
        "role": role,
    })
}

pub fn client_body(nom: &str, numero: &str) -> Value {
    json!({
        "nom": nom,
        "prenom": "Alice",
        "adresse": "1 rue Haute, Paris",
        "numero": numero,
        "email": "",
        "autres": null,
    })
}

pub fn machine_body(client_id: i64, secretaire_id: i64) -> Value {
    json!({
        "marque": "Dell",
        "modele": "Latitude 5420",
        "defaut": "écran cassé",
        "rendezVous": "2026-06-15",
        "clientId": client_id,
        "secretaireId": secretaire_id,
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `id` field of the body
    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().expect("No id in response")
    }

    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
