//! End-to-end HTTP behaviour of the contact routes over the in-memory store.

mod common;

use axum::http::Method;
use common::{send, submission, test_app, ADMIN_TOKEN, VIEWER_TOKEN};
use contact_desk::OffsetMode;
use serde_json::json;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test]
async fn submission_returns_receipt_distinct_from_row_id() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let (status, body) = send(&t.router, Method::POST, "/contact", None, Some(submission("John"))).await?;
    assert_eq!(status, 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thank you for your message! We will get back to you soon.");
    let receipt = body["id"].as_str().ok_or("id is not a string")?;
    assert!(receipt.starts_with("contact-"));
    assert!(receipt["contact-".len()..].parse::<i64>().is_ok());

    let stored = t.contacts.get_contact_by_id(1).await?.ok_or("row missing")?;
    assert_ne!(receipt, stored.id.to_string());
    assert_eq!(stored.name, "John");
    Ok(())
}

#[tokio::test]
async fn invalid_submissions_are_rejected_without_writing() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let mut missing = submission("Ann");
    missing.as_object_mut().ok_or("not an object")?.remove("subject");
    let mut bad_email = submission("Ann");
    bad_email["email"] = json!("not-an-email");

    for body in [missing, bad_email, json!({}), json!("text")] {
        let (status, err) = send(&t.router, Method::POST, "/contact", None, Some(body)).await?;
        assert_eq!(status, 400);
        assert_eq!(err["error"]["code"], "validation_error");
        assert!(err["error"]["details"].is_array());
    }
    assert!(t.repo.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))?;
    let response = tower::ServiceExt::oneshot(t.router.clone(), req).await?;
    assert_eq!(response.status(), 400);
    assert!(t.repo.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_the_admin_capability() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    send(&t.router, Method::POST, "/contact", None, Some(submission("Existing"))).await?;

    let routes = [
        (Method::GET, "/contact/admin", None),
        (Method::GET, "/contact/admin/1", None),
        (Method::GET, "/contact/admin/999", None),
        (Method::PATCH, "/contact/admin/1", Some(json!({"subject": "x"}))),
        (Method::PATCH, "/contact/admin/999", Some(json!({}))),
        (Method::DELETE, "/contact/admin/1", None),
        (Method::DELETE, "/contact/admin/not-a-number", None),
    ];
    for (method, uri, body) in routes {
        let (status, _) = send(&t.router, method.clone(), uri, None, body.clone()).await?;
        assert_eq!(status, 401, "{method} {uri} without token");
        let (status, _) = send(&t.router, method.clone(), uri, Some("unknown"), body.clone()).await?;
        assert_eq!(status, 401, "{method} {uri} with unknown token");
        let (status, _) = send(&t.router, method.clone(), uri, Some(VIEWER_TOKEN), body).await?;
        assert_eq!(status, 403, "{method} {uri} without capability");
    }
    assert!(t.contacts.get_contact_by_id(1).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let token = Some(ADMIN_TOKEN);
    let (status, body) = send(&t.router, Method::GET, "/contact/admin/42", token, None).await?;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "Contact not found");
    let (status, _) = send(&t.router, Method::PATCH, "/contact/admin/42", token, Some(json!({"name": "X"}))).await?;
    assert_eq!(status, 404);
    let (status, _) = send(&t.router, Method::DELETE, "/contact/admin/42", token, None).await?;
    assert_eq!(status, 404);
    let (status, _) = send(&t.router, Method::GET, "/contact/admin/abc", token, None).await?;
    assert_eq!(status, 400);
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_round_trips() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let sent = submission("Grace");
    send(&t.router, Method::POST, "/contact", None, Some(sent.clone())).await?;
    let (status, got) = send(&t.router, Method::GET, "/contact/admin/1", Some(ADMIN_TOKEN), None).await?;
    assert_eq!(status, 200);
    assert_eq!(got["id"], 1);
    for field in ["name", "email", "subject", "message"] {
        assert_eq!(got[field], sent[field], "{field}");
    }
    assert!(got["createdAt"].is_string());
    assert!(got["userId"].is_null());
    Ok(())
}

#[tokio::test]
async fn update_is_a_partial_merge() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    send(&t.router, Method::POST, "/contact", None, Some(submission("Alan"))).await?;
    let before = t.contacts.get_contact_by_id(1).await?.ok_or("row missing")?;

    let (status, after) = send(
        &t.router,
        Method::PATCH,
        "/contact/admin/1",
        Some(ADMIN_TOKEN),
        Some(json!({"subject": "Updated Subject"})),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(after["subject"], "Updated Subject");
    assert_eq!(after["name"], before.name.as_str());
    assert_eq!(after["email"], before.email.as_str());
    assert_eq!(after["message"], before.message.as_str());

    let (status, err) = send(
        &t.router,
        Method::PATCH,
        "/contact/admin/1",
        Some(ADMIN_TOKEN),
        Some(json!({"email": "broken"})),
    )
    .await?;
    assert_eq!(status, 400);
    assert_eq!(err["error"]["details"][0]["field"], "email");
    Ok(())
}

#[tokio::test]
async fn delete_twice_is_no_content_then_not_found() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    send(&t.router, Method::POST, "/contact", None, Some(submission("Ada"))).await?;
    let (status, body) = send(&t.router, Method::DELETE, "/contact/admin/1", Some(ADMIN_TOKEN), None).await?;
    assert_eq!(status, 204);
    assert!(body.is_null());
    let (status, _) = send(&t.router, Method::DELETE, "/contact/admin/1", Some(ADMIN_TOKEN), None).await?;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn page_of_two_from_five_rows() -> TestResult {
    for mode in [OffsetMode::PageTimesLimit, OffsetMode::OneBased] {
        let t = test_app(mode);
        for name in ["A", "B", "C", "D", "E"] {
            send(&t.router, Method::POST, "/contact", None, Some(submission(name))).await?;
        }
        let (status, rows) = send(
            &t.router,
            Method::GET,
            "/contact/admin?limit=2&page=1&sortBy=id:asc",
            Some(ADMIN_TOKEN),
            None,
        )
        .await?;
        assert_eq!(status, 200);
        let rows = rows.as_array().ok_or("not an array")?;
        assert_eq!(rows.len(), 2, "{mode:?}");
        let first_id = match mode {
            OffsetMode::PageTimesLimit => 3,
            OffsetMode::OneBased => 1,
        };
        assert_eq!(rows[0]["id"], first_id, "{mode:?}");
    }
    Ok(())
}

#[tokio::test]
async fn listing_filters_and_sorts() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    for name in ["Zed", "Amy", "Bob"] {
        send(&t.router, Method::POST, "/contact", None, Some(submission(name))).await?;
    }
    let (_, rows) = send(&t.router, Method::GET, "/contact/admin?sortBy=name:asc", Some(ADMIN_TOKEN), None).await?;
    let names: Vec<_> = rows
        .as_array()
        .ok_or("not an array")?
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, ["Amy", "Bob", "Zed"]);

    let (_, rows) = send(&t.router, Method::GET, "/contact/admin?email=bob@example.com", Some(ADMIN_TOKEN), None).await?;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["name"], "Bob");

    let (status, err) = send(&t.router, Method::GET, "/contact/admin?sortBy=password", Some(ADMIN_TOKEN), None).await?;
    assert_eq!(status, 400);
    assert_eq!(err["error"]["details"][0]["field"], "sortBy");
    Ok(())
}

#[tokio::test]
async fn common_routes_respond() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let (status, body) = send(&t.router, Method::GET, "/health", None, None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    let (status, body) = send(&t.router, Method::GET, "/ready", None, None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "ok");
    let (status, body) = send(&t.router, Method::GET, "/openapi.json", None, None).await?;
    assert_eq!(status, 200);
    assert!(body["paths"]["/contact"].is_object());
    Ok(())
}

#[tokio::test]
async fn contact_routes_nest_under_the_api_prefix() -> TestResult {
    use contact_desk::{app, AppState, ContactService, InMemoryContactRepository, Settings, StaticTokenAuthorizer};
    use std::sync::Arc;

    let settings = Settings::default();
    assert_eq!(settings.api_prefix, "/v1");
    let contacts = ContactService::new(Arc::new(InMemoryContactRepository::new()), settings.offset_mode);
    let state = AppState::new(contacts, Arc::new(StaticTokenAuthorizer::new(&[])));
    let router = app(state, &settings);

    let (status, _) = send(&router, Method::POST, "/v1/contact", None, Some(submission("Nested"))).await?;
    assert_eq!(status, 201);
    let (status, _) = send(&router, Method::POST, "/contact", None, Some(submission("Root"))).await?;
    assert_eq!(status, 404);
    let (status, _) = send(&router, Method::GET, "/health", None, None).await?;
    assert_eq!(status, 200);
    Ok(())
}

/// Store whose every call fails, as when the database is unreachable.
struct UnreachableStore;

#[async_trait::async_trait]
impl contact_desk::ContactRepository for UnreachableStore {
    async fn health_check(&self) -> Result<(), contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn insert(&self, _: &contact_desk::NewContact) -> Result<contact_desk::Contact, contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find(
        &self,
        _: &contact_desk::ContactFilter,
        _: Option<&contact_desk::model::SortBy>,
        _: contact_desk::model::PageWindow,
    ) -> Result<Vec<contact_desk::Contact>, contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_by_id(&self, _: i32) -> Result<Option<contact_desk::Contact>, contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(
        &self,
        _: i32,
        _: &contact_desk::ContactUpdate,
    ) -> Result<Option<contact_desk::Contact>, contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _: i32) -> Result<Option<contact_desk::Contact>, contact_desk::AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

#[tokio::test]
async fn ready_reports_degraded_store() -> TestResult {
    use contact_desk::{app, AppState, ContactService, Settings, StaticTokenAuthorizer};
    use std::sync::Arc;

    let settings = Settings {
        api_prefix: String::new(),
        ..Settings::default()
    };
    let contacts = ContactService::new(Arc::new(UnreachableStore), settings.offset_mode);
    let router = app(
        AppState::new(contacts, Arc::new(StaticTokenAuthorizer::new(&[]))),
        &settings,
    );

    let (status, body) = send(&router, Method::GET, "/ready", None, None).await?;
    assert_eq!(status, 503);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");

    let (status, body) = send(&router, Method::GET, "/health", None, None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&router, Method::POST, "/contact", None, Some(submission("Lost"))).await?;
    assert_eq!(status, 500);
    assert_eq!(body["error"]["code"], "internal_error");
    assert_eq!(body["error"]["message"], "Internal server error");
    Ok(())
}

#[tokio::test]
async fn oversized_submission_is_rejected_without_writing() -> TestResult {
    use axum::http::header;

    let t = test_app(OffsetMode::OneBased);
    let mut body = submission("Big");
    body["message"] = json!("x".repeat(contact_desk::Settings::default().body_limit_bytes + 1));
    let bytes = serde_json::to_vec(&body)?;
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(axum::body::Body::from(bytes))?;
    let response = tower::ServiceExt::oneshot(t.router.clone(), req).await?;
    assert_eq!(response.status(), 413);
    assert!(t.repo.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn version_reports_package() -> TestResult {
    let t = test_app(OffsetMode::OneBased);
    let (status, body) = send(&t.router, Method::GET, "/version", None, None).await?;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "contact-desk");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}
