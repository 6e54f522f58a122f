#![allow(dead_code)]
//! Test helpers for integration tests.
//!
//! Builds the real router over the seeded in-memory store and provides a
//! small request builder plus response assertions.

use std::sync::Arc;

use salvo::Service;
use salvo::http::header::CONTENT_TYPE;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt};

use casefile_test::app::api::routes;
use casefile_test::app::store_handler::{StoreHandler, Stores};
use casefile_test::component::db::memory::MemoryStore;

/// Builds a test service over a fresh, seeded in-memory store.
#[must_use]
pub fn make_service() -> Service {
    let store = Arc::new(MemoryStore::seeded());
    let stores = Stores {
        clients: store.clone(),
        references: store,
    };

    let router = Router::new().hoop(StoreHandler { stores }).push(routes());

    Service::new(router)
}

/// Represents an HTTP test request against the service.
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets a JSON request body.
    ///
    /// ## Panics
    /// Panics if the value cannot be serialized.
    #[must_use]
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.body = Some(serde_json::to_vec(value).expect("serializable body"));
        self
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> ApiResponse {
        let url = format!("http://127.0.0.1:8710{}", self.path);

        let mut client = RequestBuilder::new(&url, self.method);

        if let Some(body_bytes) = self.body {
            client = client
                .add_header(CONTENT_TYPE, "application/json", true)
                .body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        ApiResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Asserts that the response status matches the expected code.
    ///
    /// ## Panics
    /// Panics on a mismatch, printing the response body.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {} (body: {})",
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Parses the response body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// The `error.code` field of the error envelope.
    #[must_use]
    pub fn error_code(&self) -> String {
        self.json()["error"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_owned()
    }

    /// The `error.details` mapping of the error envelope.
    #[must_use]
    pub fn error_details(&self) -> serde_json::Value {
        self.json()["error"]["details"].clone()
    }
}

/// Builds a minimal valid create payload.
#[must_use]
pub fn client_payload(
    first: &str,
    last: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "first_name": first,
        "last_name": last,
        "date_of_birth": "1990-06-15",
        "email": email,
        "phone": phone,
        "status_code": "active",
    })
}

/// Creates a client through the API and returns its representation.
///
/// ## Panics
/// Panics if creation does not return 201.
pub async fn create_client(service: &Service, payload: serde_json::Value) -> serde_json::Value {
    ApiRequest::post("/api/clients")
        .json(&payload)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}
