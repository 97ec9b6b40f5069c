//! Content API Tests
//!
//! Admin-only writes, display ordering and the contact inbox, exercised
//! through the full router.

mod common;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use serde_json::{json, Value};

use common::{authed, body_json, body_text, json_request, TestApp, USER_EMAIL, USER_PASSWORD};

fn project(title: &str, order: i32, featured: bool) -> Value {
    json!({
        "title": title,
        "description": format!("{} description", title),
        "technologies": ["Rust", "Axum"],
        "featured": featured,
        "order": order
    })
}

// =============================================================================
// Authorization
// =============================================================================

/// Missing token is 401, non-admin token is 403.
#[tokio::test]
async fn test_write_authorization() {
    let app = TestApp::new();
    let body = project("Blog", 1, true);

    let response = app.send(json_request("POST", "/api/projects", None, &body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let visitor = app.token(USER_EMAIL, USER_PASSWORD);
    let response = app
        .send(json_request("POST", "/api/projects", Some(&visitor), &body))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized", "code": 403 }));

    let response = app
        .send(json_request("POST", "/api/projects", Some("not.a.token"), &body))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(app.store.is_empty().unwrap());
}

/// Reads are public.
#[tokio::test]
async fn test_reads_are_public() {
    let app = TestApp::new();
    for path in ["/api/projects", "/api/experience", "/api/education", "/api/skills"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        assert_eq!(body_json(response).await, json!([]));
    }
    assert_eq!(body_json(app.get("/api/profile").await).await, Value::Null);
}

// =============================================================================
// Ordering
// =============================================================================

/// Lists follow `order`, then creation time.
#[tokio::test]
async fn test_projects_listed_in_display_order() {
    let app = TestApp::new();
    let token = app.admin_token();

    for (title, order) in [("Third", 3), ("First", 1), ("Second", 2)] {
        let response = app
            .send(json_request("POST", "/api/projects", Some(&token), &project(title, order, true)))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = body_json(app.get("/api/projects").await).await;
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

/// The home page shows at most three featured projects.
#[tokio::test]
async fn test_home_page_shows_featured_projects_only() {
    let app = TestApp::new();
    let token = app.admin_token();

    let profile = json!({
        "name": "Ada",
        "title": "Engineer",
        "bio": "Builds reliable systems",
        "email": "ada@example.com"
    });
    let response = app
        .send(json_request("PUT", "/api/profile", Some(&token), &profile))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    for (title, order, featured) in [
        ("Alpha", 1, true),
        ("Hidden", 2, false),
        ("Beta", 3, true),
        ("Gamma", 4, true),
        ("Delta", 5, true),
    ] {
        app.send(json_request("POST", "/api/projects", Some(&token), &project(title, order, featured)))
            .await;
    }

    let html = body_text(app.get("/").await).await;
    assert!(html.contains("Hi, I'm Ada"));
    for shown in ["Alpha", "Beta", "Gamma"] {
        assert!(html.contains(shown), "{} missing", shown);
    }
    assert!(!html.contains("Hidden"));
    assert!(!html.contains("Delta"));
}

// =============================================================================
// Update and delete
// =============================================================================

/// Update replaces the editable fields and keeps identity.
#[tokio::test]
async fn test_update_is_full_replacement() {
    let app = TestApp::new();
    let token = app.admin_token();

    let created = body_json(
        app.send(json_request(
            "POST",
            "/api/experience",
            Some(&token),
            &json!({
                "company": "Tech Corp",
                "position": "Engineer",
                "description": "Built things",
                "startDate": "2022-01",
                "location": "Remote",
                "order": 1
            }),
        ))
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let updated = body_json(
        app.send(json_request(
            "PUT",
            &format!("/api/experience/{}", id),
            Some(&token),
            &json!({
                "company": "Tech Corp",
                "position": "Senior Engineer",
                "description": "Built more things",
                "startDate": "2022-01",
                "current": true
            }),
        ))
        .await,
    )
    .await;

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["position"], "Senior Engineer");
    assert!(updated.get("location").map_or(true, Value::is_null));
}

/// Deleting an unknown record is 404.
#[tokio::test]
async fn test_delete_unknown_record() {
    let app = TestApp::new();
    let token = app.admin_token();

    let response = app
        .send(authed(
            "DELETE",
            "/api/education/5f0c6f2e-8f7e-4a43-9f3c-2b7a3c3d9e10",
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], 404);
}

// =============================================================================
// Contact inbox
// =============================================================================

/// Public submissions land in the inbox newest first.
#[tokio::test]
async fn test_contact_inbox_flow() {
    let app = TestApp::new();
    let token = app.admin_token();

    for name in ["First", "Second"] {
        let response = app
            .send(json_request(
                "POST",
                "/api/contact",
                None,
                &json!({
                    "name": name,
                    "email": "someone@example.com",
                    "subject": "Hello",
                    "message": "Nice site"
                }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        // keep creation timestamps distinct
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let inbox = body_json(app.send(authed("GET", "/api/contact", &token)).await).await;
    let names: Vec<&str> = inbox
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);

    let id = inbox[0]["id"].as_str().unwrap();
    let response = app
        .send(authed("PATCH", &format!("/api/contact/{}", id), &token))
        .await;
    assert_eq!(body_json(response).await["read"], true);
    assert_eq!(app.store.counts().unwrap().unread_messages, 1);

    let response = app
        .send(authed("DELETE", &format!("/api/contact/{}", id), &token))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.store.counts().unwrap().messages, 1);
}

// =============================================================================
// Admin pages
// =============================================================================

/// Admin pages accept the cookie set by login.
#[tokio::test]
async fn test_admin_dashboard_with_login_cookie() {
    let app = TestApp::new();

    let login = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }).to_string(),
        ))
        .unwrap();
    let response = app.send(login).await;
    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .uri("/admin")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Dashboard"));

    let visitor = app.token(USER_EMAIL, USER_PASSWORD);
    let response = app.send(authed("GET", "/admin", &visitor)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
