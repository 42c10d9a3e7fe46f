//! Integration tests for the dashboard and health endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, machine_body};

#[tokio::test]
async fn test_empty_dashboard() {
    let app = TestApp::new().await;
    let response = app.get("/api/dashboard/stats").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "totalMachines": 0,
            "totalClients": 0,
            "totalUsers": 0,
            "enCours": 0,
            "termine": 0,
            "anomalie": 0,
            "enAttente": 0,
        })
    );
}

#[tokio::test]
async fn test_dashboard_counts_by_status() {
    let app = TestApp::new().await;
    let client = app.create_client("Durand", "0698765432").await;
    let other = app.create_client("Martin", "0611111111").await;
    let secretary = app.create_user("s@x.com", "0600000001", "SECRETAIRE").await;
    app.create_user("t@x.com", "0600000002", "TECHNICIEN").await;

    for statut in ["EN_COURS", "EN_COURS", "ANOMALIE", "TERMINE"] {
        let mut body = machine_body(client, secretary);
        body["statut"] = json!(statut);
        app.create_machine(body).await;
    }
    app.create_machine(machine_body(other, secretary)).await;

    let response = app.get("/api/dashboard/stats").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalMachines"], 5);
    assert_eq!(response.body["totalClients"], 2);
    assert_eq!(response.body["totalUsers"], 2);
    assert_eq!(response.body["enCours"], 2);
    assert_eq!(response.body["termine"], 1);
    assert_eq!(response.body["anomalie"], 1);
    assert_eq!(response.body["enAttente"], 1);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["backend"], "memory");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let response = app.get("/api/nowhere").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
