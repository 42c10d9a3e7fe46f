//! Integration tests for client endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, client_body, machine_body};

#[tokio::test]
async fn test_create_and_get_client() {
    let app = TestApp::new().await;
    let id = app.create_client("Durand", "0698765432").await;

    let response = app.get(&format!("/api/clients/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["nom"], "Durand");
    assert_eq!(response.body["email"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_duplicate_contact_number() {
    let app = TestApp::new().await;
    let first = app.create_client("Durand", "0698765432").await;

    let response = app
        .post("/api/clients", client_body("Martin", "0698765432"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "DUPLICATE_CONTACT");
    assert_eq!(response.body["message"], "Numéro déjà utilisé");

    let response = app.get(&format!("/api/clients/{first}")).await;
    assert_eq!(response.body["nom"], "Durand");
    assert_eq!(app.get("/api/clients").await.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_validation() {
    let app = TestApp::new().await;
    let mut body = client_body("", "0698765432");
    body["email"] = json!("pas-un-email");

    let response = app.post("/api/clients", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("Nom est obligatoire"));
    assert!(message.contains("Email invalide"));
}

#[tokio::test]
async fn test_search_clients() {
    let app = TestApp::new().await;
    app.create_client("Durand", "0698765432").await;
    app.create_client("Martin", "0611111111").await;

    let response = app.get("/api/clients/search?keyword=dur").await;
    assert_eq!(response.status, StatusCode::OK);
    let hits = response.body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["nom"], "Durand");
}

#[tokio::test]
async fn test_update_client_overwrites_profile() {
    let app = TestApp::new().await;
    let mut body = client_body("Durand", "0698765432");
    body["autres"] = json!("client fidèle");
    let response = app.post("/api/clients", body).await;
    let id = response.id();

    let response = app
        .put(&format!("/api/clients/{id}"), client_body("Durant", "0698765433"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["nom"], "Durant");
    assert_eq!(response.body["numero"], "0698765433");
    assert_eq!(response.body["autres"], serde_json::Value::Null);

    let response = app
        .put("/api/clients/999", client_body("Durant", "0698765433"))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_client_with_machine_conflicts() {
    let app = TestApp::new().await;
    let client = app.create_client("Durand", "0698765432").await;
    let secretary = app.create_user("s@x.com", "0600000001", "SECRETAIRE").await;
    let machine = app.create_machine(machine_body(client, secretary)).await;

    let response = app.delete(&format!("/api/clients/{client}")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "REFERENTIAL_CONFLICT");

    app.delete(&format!("/api/machines/{machine}")).await;
    let response = app.delete(&format!("/api/clients/{client}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Client supprimé avec succès");
}
