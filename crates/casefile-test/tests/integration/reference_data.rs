//! Reference-data endpoint and healthcheck tests.

use salvo::http::StatusCode;

use crate::helpers::{ApiRequest, make_service};

#[test_log::test(tokio::test)]
async fn healthcheck_responds() {
    let service = make_service();

    let response = ApiRequest::get("/api/app/healthcheck")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(String::from_utf8_lossy(&response.body), "OK");
}

#[test_log::test(tokio::test)]
async fn reference_data_lists_active_entries_in_display_order() {
    let service = make_service();

    let data = ApiRequest::get("/api/reference-data")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let statuses = data["client_statuses"].as_array().unwrap();
    let codes: Vec<_> = statuses
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert_eq!(
        codes,
        vec!["active", "inactive", "pending", "waitlisted", "closed"]
    );
    // Inactive entries stay out of listings.
    assert!(!codes.contains(&"deleted"));
    assert!(!codes.contains(&"deceased"));

    assert_eq!(data["languages"].as_array().unwrap().len(), 10);
    assert_eq!(
        data["languages"][0]["code"].as_str(),
        Some("en-NZ")
    );
    assert_eq!(data["pronouns"].as_array().unwrap().len(), 7);
    assert_eq!(data["sex_values"].as_array().unwrap().len(), 5);
}

#[test_log::test(tokio::test)]
async fn inactive_codes_remain_assignable() {
    let service = make_service();

    // `deceased` is excluded from listings but still resolves on write.
    let body = serde_json::json!({
        "first_name": "Rest",
        "last_name": "Inpeace",
        "date_of_birth": "1920-01-01",
        "phone": "021 555 0100",
        "status_code": "deceased",
    });

    let created = ApiRequest::post("/api/clients")
        .json(&body)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(created["status"]["code"], "deceased");
    assert_eq!(created["status"]["is_active"], false);
}
