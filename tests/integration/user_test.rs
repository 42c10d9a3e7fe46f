//! Integration tests for staff account endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, user_body};
use repairdesk_core::config::BootstrapConfig;
use repairdesk_service::ensure_default_admin;

#[tokio::test]
async fn test_create_user_hides_credential() {
    let app = TestApp::new().await;
    let response = app
        .post("/api/users", user_body("s@x.com", "0600000001", "SECRETAIRE"))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "SECRETAIRE");
    assert_eq!(response.body["active"], true);
    assert!(response.body.get("passwordHash").is_none());
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("createdAt").is_some());
}

#[tokio::test]
async fn test_duplicate_email_and_numero() {
    let app = TestApp::new().await;
    app.create_user("s@x.com", "0600000001", "SECRETAIRE").await;

    let response = app
        .post("/api/users", user_body("s@x.com", "0600000002", "TECHNICIEN"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "DUPLICATE_EMAIL");
    assert_eq!(response.body["message"], "Email déjà utilisé");

    let response = app
        .post("/api/users", user_body("t@x.com", "0600000001", "TECHNICIEN"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "DUPLICATE_CONTACT");
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = TestApp::new().await;
    let mut body = user_body("not-an-email", "0600000001", "ADMIN");
    body["password"] = json!("abc");

    let response = app.post("/api/users", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("Email invalide"));
    assert!(message.contains("6 caractères"));

    let mut body = user_body("a@x.com", "0600000001", "ADMIN");
    body.as_object_mut().unwrap().remove("role");
    let response = app.post("/api/users", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Rôle est obligatoire");
}

#[tokio::test]
async fn test_get_and_list_by_role() {
    let app = TestApp::new().await;
    let tech = app.create_user("t@x.com", "0600000001", "TECHNICIEN").await;
    app.create_user("s@x.com", "0600000002", "SECRETAIRE").await;

    let response = app.get(&format!("/api/users/{tech}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "t@x.com");

    let response = app.get("/api/users/role/TECHNICIEN").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 1);

    let response = app.get("/api/users").await;
    assert_eq!(response.body.as_array().unwrap().len(), 2);

    let response = app.get("/api/users/role/PLOMBIER").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.get("/api/users/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Utilisateur non trouvé");
}

#[tokio::test]
async fn test_update_user_keeps_role_and_secret() {
    let app = TestApp::new().await;
    let id = app.create_user("t@x.com", "0600000001", "TECHNICIEN").await;

    let mut body = user_body("t2@x.com", "0600000009", "ADMIN");
    body["password"] = json!("");
    let response = app.put(&format!("/api/users/{id}"), body).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "t2@x.com");
    assert_eq!(response.body["role"], "TECHNICIEN");

    assert!(
        app.state
            .directory
            .verify_credentials("t2@x.com", "secret1")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_update_user_rejects_taken_email() {
    let app = TestApp::new().await;
    let a = app.create_user("a@x.com", "0600000001", "TECHNICIEN").await;
    app.create_user("b@x.com", "0600000002", "TECHNICIEN").await;

    let response = app
        .put(
            &format!("/api/users/{a}"),
            user_body("b@x.com", "0600000001", "TECHNICIEN"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new().await;
    let id = app.create_user("a@x.com", "0600000001", "TECHNICIEN").await;

    let response = app.delete(&format!("/api/users/{id}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Utilisateur supprimé avec succès");

    let response = app.delete(&format!("/api/users/{id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bootstrap_admin_is_listed_once() {
    let app = TestApp::new().await;
    let config = BootstrapConfig::default();
    assert!(ensure_default_admin(&app.state.directory, &config).await.unwrap());
    assert!(!ensure_default_admin(&app.state.directory, &config).await.unwrap());

    let response = app.get("/api/users/role/ADMIN").await;
    let admins = response.body.as_array().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0]["email"], "admin@repair.com");
    assert_eq!(admins[0]["nom"], "Administrateur");
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    let id = app.create_user("t@x.com", "0600000001", "TECHNICIEN").await;

    let response = app
        .post(
            "/api/auth/login",
            json!({ "email": "t@x.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);
    assert_eq!(response.body["nom"], "Martin");
    assert_eq!(response.body["prenom"], "Claire");
    assert_eq!(response.body["email"], "t@x.com");
    assert_eq!(response.body["role"], "TECHNICIEN");
    assert_eq!(response.body["message"], "Connexion réussie");
    assert!(response.body.get("token").is_none());
    assert!(response.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_rejections() {
    let app = TestApp::new().await;
    app.create_user("t@x.com", "0600000001", "TECHNICIEN").await;

    let wrong_secret = app
        .post(
            "/api/auth/login",
            json!({ "email": "t@x.com", "password": "secret2" }),
        )
        .await;
    assert_eq!(wrong_secret.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_secret.error_code(), "AUTHENTICATION");

    let unknown = app
        .post(
            "/api/auth/login",
            json!({ "email": "nobody@x.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.error_code(), "AUTHENTICATION");
    assert_eq!(unknown.body["message"], wrong_secret.body["message"]);

    let missing = app
        .post("/api/auth/login", json!({ "email": "t@x.com", "password": "" }))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_code(), "VALIDATION");
}
