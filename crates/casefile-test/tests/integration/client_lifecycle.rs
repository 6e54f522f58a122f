//! Lifecycle tests: create, read, update, patch, soft delete.

use salvo::http::StatusCode;

use crate::helpers::{ApiRequest, client_payload, create_client, make_service};

#[test_log::test(tokio::test)]
async fn create_returns_resolved_record() {
    let service = make_service();

    let body = serde_json::json!({
        "first_name": "Jane",
        "last_name": "Smith",
        "date_of_birth": "1985-03-10",
        "email": "jane@example.com",
        "status_code": "active",
        "primary_language_code": "mi-NZ",
        "pronoun_code": "she-her",
        "interpreter_needed": true,
    });
    let created = create_client(&service, body).await;

    assert_eq!(created["full_name"], "Jane Smith");
    assert_eq!(created["status"]["code"], "active");
    assert_eq!(created["status"]["name"], "Active");
    assert_eq!(created["primary_language"]["name"], "Te Reo Māori");
    assert_eq!(created["pronoun"]["display_text"], "She/Her");
    assert_eq!(created["sex"], serde_json::Value::Null);
    assert_eq!(created["interpreter_needed"], true);
    assert_eq!(created["deleted_at"], serde_json::Value::Null);
    assert!(created["id"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn create_requires_a_contact_method() {
    let service = make_service();

    let response = ApiRequest::post("/api/clients")
        .json(&client_payload("Jane", "Smith", None, None))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert!(response.error_details()["__all__"].as_str().is_some());
    assert!(
        response.json()["error"]["request_id"]
            .as_str()
            .is_some_and(|id| id.starts_with("req_"))
    );
}

#[test_log::test(tokio::test)]
async fn create_rejects_future_birth_date() {
    let service = make_service();

    let mut payload = client_payload("Jane", "Smith", Some("jane@example.com"), None);
    payload["date_of_birth"] = serde_json::json!("2999-01-01");

    let response = ApiRequest::post("/api/clients")
        .json(&payload)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert!(response.error_details()["date_of_birth"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn create_rejects_unresolvable_codes_per_field() {
    let service = make_service();

    let mut payload = client_payload("Jane", "Smith", Some("jane@example.com"), None);
    payload["status_code"] = serde_json::json!("archived");
    payload["sex_code"] = serde_json::json!("yes");

    let response = ApiRequest::post("/api/clients")
        .json(&payload)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.error_code(), "INVALID_REFERENCE");
    let details = response.error_details();
    assert!(details["status_code"].as_str().is_some());
    assert!(details["sex_code"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn duplicate_email_is_rejected_case_insensitively() {
    let service = make_service();

    create_client(
        &service,
        client_payload("Alice", "Adams", Some("a@x.com"), None),
    )
    .await;

    let response = ApiRequest::post("/api/clients")
        .json(&client_payload("Bob", "Brown", Some("A@X.COM"), None))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    assert_eq!(response.error_code(), "DUPLICATE_EMAIL");
}

#[test_log::test(tokio::test)]
async fn get_unknown_client_is_not_found() {
    let service = make_service();

    let response = ApiRequest::get(&format!("/api/clients/{}", uuid::Uuid::now_v7()))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(response.error_code(), "CLIENT_NOT_FOUND");
}

#[test_log::test(tokio::test)]
async fn malformed_client_id_is_a_validation_error() {
    let service = make_service();

    let response = ApiRequest::get("/api/clients/not-a-uuid")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[test_log::test(tokio::test)]
async fn full_update_replaces_all_mutable_fields() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), None),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let update = serde_json::json!({
        "first_name": "Jane",
        "last_name": "Smythe",
        "date_of_birth": "1985-03-10",
        "email": "jane@example.com",
        "phone": "021 555 0000",
        "status_code": "inactive",
        "primary_language_code": "fr-FR",
        "interpreter_needed": true,
    });

    let updated = ApiRequest::put(&format!("/api/clients/{id}"))
        .json(&update)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(updated["full_name"], "Jane Smythe");
    assert_eq!(updated["status"]["code"], "inactive");
    assert_eq!(updated["primary_language"]["code"], "fr-FR");
    assert_eq!(updated["phone"], "021 555 0000");
    // Omitted optional references are cleared on full update.
    assert_eq!(updated["pronoun"], serde_json::Value::Null);
}

#[test_log::test(tokio::test)]
async fn full_update_rejects_anothers_email() {
    let service = make_service();

    create_client(
        &service,
        client_payload("Alice", "Adams", Some("a@x.com"), None),
    )
    .await;
    let bob = create_client(
        &service,
        client_payload("Bob", "Brown", Some("b@x.com"), None),
    )
    .await;

    let mut update = client_payload("Bob", "Brown", Some("A@x.com"), None);
    update["status_code"] = serde_json::json!("active");

    let response = ApiRequest::put(&format!("/api/clients/{}", bob["id"].as_str().unwrap()))
        .json(&update)
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    assert_eq!(response.error_code(), "DUPLICATE_EMAIL");
}

#[test_log::test(tokio::test)]
async fn patch_distinguishes_null_from_absent() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), Some("021 555 0000")),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    // Explicit null clears the email; the untouched phone keeps the record valid.
    let patched = ApiRequest::patch(&format!("/api/clients/{id}"))
        .json(&serde_json::json!({"email": null}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(patched["email"], serde_json::Value::Null);
    assert_eq!(patched["phone"], "021 555 0000");
    assert_eq!(patched["first_name"], "Jane");
}

#[test_log::test(tokio::test)]
async fn empty_patch_is_an_accepted_noop() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), None),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let patched = ApiRequest::patch(&format!("/api/clients/{id}"))
        .json(&serde_json::json!({}))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(patched["updated_at"], created["updated_at"]);
}

#[test_log::test(tokio::test)]
async fn patch_cannot_strip_the_last_contact_method() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), None),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = ApiRequest::patch(&format!("/api/clients/{id}"))
        .json(&serde_json::json!({"email": null}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[test_log::test(tokio::test)]
async fn soft_delete_is_one_way() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), None),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = ApiRequest::delete(&format!("/api/clients/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    // Deleted records are gone for every write path.
    ApiRequest::delete(&format!("/api/clients/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ApiRequest::patch(&format!("/api/clients/{id}"))
        .json(&serde_json::json!({"first_name": "Janet"}))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Direct read-back still works and shows the deletion markers.
    let fetched = ApiRequest::get(&format!("/api/clients/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched["status"]["code"], "deleted");
    assert!(fetched["deleted_at"].as_str().is_some());

    // And the listing no longer includes it.
    let page = ApiRequest::get("/api/clients")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["count"], 0);
}

#[test_log::test(tokio::test)]
async fn deleted_clients_email_is_reusable() {
    let service = make_service();

    let created = create_client(
        &service,
        client_payload("Jane", "Smith", Some("jane@example.com"), None),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    ApiRequest::delete(&format!("/api/clients/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Uniqueness only binds live records.
    create_client(
        &service,
        client_payload("June", "Smith", Some("jane@example.com"), None),
    )
    .await;
}
