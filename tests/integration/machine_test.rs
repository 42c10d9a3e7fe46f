//! Integration tests for repair job endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, machine_body};

struct Desk {
    app: TestApp,
    client: i64,
    secretary: i64,
    technician: i64,
}

async fn desk() -> Desk {
    let app = TestApp::new().await;
    let client = app.create_client("Durand", "0698765432").await;
    let secretary = app.create_user("s@x.com", "0600000001", "SECRETAIRE").await;
    let technician = app.create_user("t@x.com", "0600000002", "TECHNICIEN").await;
    Desk {
        app,
        client,
        secretary,
        technician,
    }
}

#[tokio::test]
async fn test_intake_defaults_and_embedded_records() {
    let d = desk().await;
    let response = d
        .app
        .post("/api/machines", machine_body(d.client, d.secretary))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["statut"], "EN_ATTENTE");
    assert_eq!(response.body["paye"], false);
    assert_eq!(response.body["rendezVous"], "2026-06-15");
    assert_eq!(response.body["client"]["nom"], "Durand");
    assert_eq!(response.body["secretaire"]["id"], d.secretary);
    assert!(response.body["secretaire"].get("passwordHash").is_none());
    assert_eq!(response.body["technicien"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_technician_cannot_register_machine() {
    let d = desk().await;
    let response = d
        .app
        .post("/api/machines", machine_body(d.client, d.technician))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "UNAUTHORIZED_ROLE");
    assert_eq!(d.app.get("/api/machines").await.body, json!([]));
}

#[tokio::test]
async fn test_secretary_cannot_be_assigned_as_technician() {
    let d = desk().await;
    let mut body = machine_body(d.client, d.secretary);
    body["technicienId"] = json!(d.secretary);

    let response = d.app.post("/api/machines", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TECHNICIAN");
}

#[tokio::test]
async fn test_unknown_references() {
    let d = desk().await;
    let response = d
        .app
        .post("/api/machines", machine_body(999, d.secretary))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = d.app.get("/api/machines/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Machine non trouvée");

    let response = d
        .app
        .put("/api/machines/999", machine_body(d.client, d.secretary))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_appointment_is_rejected() {
    let d = desk().await;
    let mut body = machine_body(d.client, d.secretary);
    body.as_object_mut().unwrap().remove("rendezVous");

    let response = d.app.post("/api/machines", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
    assert_eq!(response.body["message"], "Date de rendez-vous est obligatoire");
}

#[tokio::test]
async fn test_update_without_status_keeps_status() {
    let d = desk().await;
    let mut body = machine_body(d.client, d.secretary);
    body["statut"] = json!("EN_COURS");
    body["technicienId"] = json!(d.technician);
    let id = d.app.create_machine(body).await;

    let mut update = machine_body(d.client, d.secretary);
    update["montant"] = json!(120.5);
    let response = d.app.put(&format!("/api/machines/{id}"), update).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["statut"], "EN_COURS");
    assert_eq!(response.body["montant"], 120.5);
    assert_eq!(response.body["technicien"]["id"], d.technician);
}

#[tokio::test]
async fn test_update_to_done_and_paid() {
    let d = desk().await;
    let id = d
        .app
        .create_machine(machine_body(d.client, d.secretary))
        .await;

    let mut update = machine_body(d.client, d.secretary);
    update["statut"] = json!("TERMINE");
    update["paye"] = json!(true);
    update["technicienId"] = json!(d.technician);
    update["remarqueTechnicien"] = json!("dalle remplacée");
    let response = d.app.put(&format!("/api/machines/{id}"), update).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["statut"], "TERMINE");
    assert_eq!(response.body["paye"], true);
    assert_eq!(response.body["remarqueTechnicien"], "dalle remplacée");

    let listed = d.app.get("/api/machines/statut/TERMINE").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    let listed = d.app.get("/api/machines/statut/EN_ATTENTE").await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_update_rejects_secretary_as_technician() {
    let d = desk().await;
    let id = d
        .app
        .create_machine(machine_body(d.client, d.secretary))
        .await;

    let mut update = machine_body(d.client, d.secretary);
    update["technicienId"] = json!(d.secretary);
    let response = d.app.put(&format!("/api/machines/{id}"), update).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_TECHNICIAN");

    let response = d.app.get(&format!("/api/machines/{id}")).await;
    assert_eq!(response.body["technicien"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_invalid_status_segment() {
    let d = desk().await;
    let response = d.app.get("/api/machines/statut/PERDU").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_listing_by_people_and_client() {
    let d = desk().await;
    let mut body = machine_body(d.client, d.secretary);
    body["technicienId"] = json!(d.technician);
    d.app.create_machine(body).await;
    d.app
        .create_machine(machine_body(d.client, d.secretary))
        .await;

    let by_client = d.app.get(&format!("/api/machines/client/{}", d.client)).await;
    assert_eq!(by_client.body.as_array().unwrap().len(), 2);

    let by_secretary = d
        .app
        .get(&format!("/api/machines/secretaire/{}", d.secretary))
        .await;
    assert_eq!(by_secretary.body.as_array().unwrap().len(), 2);

    let by_technician = d
        .app
        .get(&format!("/api/machines/technicien/{}", d.technician))
        .await;
    assert_eq!(by_technician.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_machines() {
    let d = desk().await;
    d.app
        .create_machine(machine_body(d.client, d.secretary))
        .await;
    let mut other = machine_body(d.client, d.secretary);
    other["marque"] = json!("Lenovo");
    other["modele"] = json!("ThinkPad X1");
    d.app.create_machine(other).await;

    let response = d.app.get("/api/machines/search?keyword=think").await;
    assert_eq!(response.status, StatusCode::OK);
    let hits = response.body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["marque"], "Lenovo");

    let response = d.app.get("/api/machines/search?keyword=DELL").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_referenced_staff_cannot_be_deleted() {
    let d = desk().await;
    let mut body = machine_body(d.client, d.secretary);
    body["technicienId"] = json!(d.technician);
    let id = d.app.create_machine(body).await;

    let response = d.app.delete(&format!("/api/users/{}", d.technician)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "REFERENTIAL_CONFLICT");

    let response = d.app.delete(&format!("/api/machines/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Machine supprimée avec succès");

    let response = d.app.delete(&format!("/api/users/{}", d.technician)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_id_gets_error_body() {
    let d = desk().await;

    let response = d.app.get("/api/machines/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
    assert!(response.body["message"].as_str().unwrap().contains("abc"));

    let response = d.app.get("/api/machines/technicien/x1").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = d
        .app
        .put("/api/machines/abc", machine_body(d.client, d.secretary))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = d.app.delete("/api/clients/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = d.app.get("/api/users/1.5").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}
