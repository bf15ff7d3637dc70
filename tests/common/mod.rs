#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use contact_desk::config::TokenGrant;
use contact_desk::{
    app, AppState, ContactService, InMemoryContactRepository, OffsetMode, Settings, StaticTokenAuthorizer,
    ADMIN_CAPABILITY,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const VIEWER_TOKEN: &str = "viewer-token";

pub struct TestApp {
    pub router: Router,
    pub repo: InMemoryContactRepository,
    pub contacts: ContactService,
}

pub fn test_app(mode: OffsetMode) -> TestApp {
    let repo = InMemoryContactRepository::new();
    let contacts = ContactService::new(Arc::new(repo.clone()), mode);
    let settings = Settings {
        api_prefix: String::new(),
        offset_mode: mode,
        access_tokens: vec![
            TokenGrant {
                token: ADMIN_TOKEN.into(),
                capabilities: [ADMIN_CAPABILITY.to_string()].into_iter().collect(),
            },
            TokenGrant {
                token: VIEWER_TOKEN.into(),
                capabilities: ["getUsers".to_string()].into_iter().collect(),
            },
        ],
        ..Settings::default()
    };
    let authorizer = StaticTokenAuthorizer::new(&settings.access_tokens);
    let state = AppState::new(contacts.clone(), Arc::new(authorizer));
    TestApp {
        router: app(state, &settings),
        repo,
        contacts,
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    let response: Response<Body> = router.clone().oneshot(req).await?;
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

pub fn submission(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "subject": "General Inquiry",
        "message": "Hello, I have a question..."
    })
}
