//! List filtering/pagination and search tests.

use chrono::{Months, Utc};
use salvo::Service;
use salvo::http::StatusCode;

use crate::helpers::{ApiRequest, client_payload, create_client, make_service};

fn years_ago(years: u32) -> chrono::NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(years * 12))
        .unwrap()
}

async fn seed_roster(service: &Service) {
    let mut jane = client_payload("Jane", "Smith", Some("jane@example.com"), None);
    jane["primary_language_code"] = serde_json::json!("mi-NZ");
    jane["interpreter_needed"] = serde_json::json!(true);
    create_client(service, jane).await;

    let mut john = client_payload("John", "Smithson", None, Some("021 777 0199"));
    john["status_code"] = serde_json::json!("pending");
    create_client(service, john).await;

    create_client(
        service,
        client_payload("Mary", "Major", Some("mary@smithmail.org"), None),
    )
    .await;

    let mut bob = client_payload("Bob", "Brown", Some("bob@example.com"), None);
    bob["interpreter_needed"] = serde_json::json!(true);
    create_client(service, bob).await;
}

fn result_names(page: &serde_json::Value) -> Vec<String> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["first_name"].as_str().unwrap().to_owned())
        .collect()
}

#[test_log::test(tokio::test)]
async fn list_applies_filters_as_logical_and() {
    let service = make_service();
    seed_roster(&service).await;

    let page = ApiRequest::get("/api/clients?status=active&interpreter_needed=true")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(page["count"], 2);
    for row in page["results"].as_array().unwrap() {
        assert_eq!(row["status"]["code"], "active");
        assert_eq!(row["interpreter_needed"], true);
    }

    let page = ApiRequest::get("/api/clients?language=mi-NZ")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(result_names(&page), vec!["Jane"]);
}

#[test_log::test(tokio::test)]
async fn list_honors_the_ordering_allow_list() {
    let service = make_service();
    seed_roster(&service).await;

    let page = ApiRequest::get("/api/clients?ordering=first_name")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(result_names(&page), vec!["Bob", "Jane", "John", "Mary"]);

    let page = ApiRequest::get("/api/clients?ordering=-first_name")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(result_names(&page), vec!["Mary", "John", "Jane", "Bob"]);

    let response = ApiRequest::get("/api/clients?ordering=email")
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[test_log::test(tokio::test)]
async fn list_paginates_with_navigation_links() {
    let service = make_service();
    seed_roster(&service).await;

    let page = ApiRequest::get("/api/clients?limit=2&ordering=first_name")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(page["count"], 4);
    assert_eq!(result_names(&page).len(), 2);
    assert_eq!(page["next"], "?limit=2&offset=2");
    assert_eq!(page["previous"], serde_json::Value::Null);

    let page = ApiRequest::get("/api/clients?limit=2&offset=2&ordering=first_name")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(result_names(&page), vec!["John", "Mary"]);
    assert_eq!(page["next"], serde_json::Value::Null);
    assert_eq!(page["previous"], "?limit=2&offset=0");
}

#[test_log::test(tokio::test)]
async fn list_filters_by_creation_date() {
    let service = make_service();
    seed_roster(&service).await;

    let today = Utc::now().date_naive();
    let page = ApiRequest::get(&format!("/api/clients?created_since={today}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["count"], 4);

    let tomorrow = today.succ_opt().unwrap();
    let page = ApiRequest::get(&format!("/api/clients?created_since={tomorrow}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["count"], 0);
}

#[test_log::test(tokio::test)]
async fn search_matches_substrings_across_fields() {
    let service = make_service();
    seed_roster(&service).await;

    let results = ApiRequest::get("/api/clients/search?q=smith")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    // Last names "Smith"/"Smithson" and the email domain "smithmail.org".
    assert_eq!(results["query"], "smith");
    assert_eq!(results["count"], 3);

    let results = ApiRequest::get("/api/clients/search?q=777%200199")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results["count"], 1);
    assert_eq!(results["results"][0]["first_name"], "John");
}

#[test_log::test(tokio::test)]
async fn search_combines_text_and_filters() {
    let service = make_service();
    seed_roster(&service).await;

    let results = ApiRequest::get("/api/clients/search?q=smith&status=pending")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(results["count"], 1);
    assert_eq!(results["results"][0]["last_name"], "Smithson");
}

#[test_log::test(tokio::test)]
async fn search_truncates_and_counts_returned_rows() {
    let service = make_service();
    seed_roster(&service).await;

    let results = ApiRequest::get("/api/clients/search?q=smith&limit=2")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    // Count reflects the rows returned, not the matching population.
    assert_eq!(results["count"], 2);
    assert_eq!(results["results"].as_array().unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn search_age_band_uses_birthday_arithmetic() {
    let service = make_service();

    // Turns 30 today.
    let mut exact = client_payload("Exact", "Thirty", Some("exact@example.com"), None);
    exact["date_of_birth"] = serde_json::json!(years_ago(30).to_string());
    create_client(&service, exact).await;

    // Turned 31 today.
    let mut over = client_payload("Over", "ThirtyOne", Some("over@example.com"), None);
    over["date_of_birth"] = serde_json::json!(years_ago(31).to_string());
    create_client(&service, over).await;

    // Turns 31 tomorrow, so still 30 today.
    let mut under = client_payload("Under", "ThirtyOne", Some("under@example.com"), None);
    under["date_of_birth"] =
        serde_json::json!(years_ago(31).succ_opt().unwrap().to_string());
    create_client(&service, under).await;

    let results = ApiRequest::get("/api/clients/search?age_min=30")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results["count"], 3);

    let results = ApiRequest::get("/api/clients/search?age_min=30&age_max=30")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let names: Vec<_> = results["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(results["count"], 2);
    assert!(names.contains(&"Exact"));
    assert!(names.contains(&"Under"));

    let results = ApiRequest::get("/api/clients/search?age_min=31")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results["count"], 1);
    assert_eq!(results["results"][0]["first_name"], "Over");
}
