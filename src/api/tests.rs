//! HTTP-level tests driving the full router

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use super::{build_router, AppState};
use crate::db::{create_test_pool, migrations};
use crate::models::{BlogCategory, BlogPost, Contact, ContactStatus, GalleryCategory, GalleryItem};

async fn setup_with_static(static_dir: &std::path::Path) -> (TestServer, AppState) {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(pool, static_dir);
    let server = TestServer::new(build_router(state.clone(), "*")).expect("Failed to start test server");
    (server, state)
}

async fn setup() -> (TestServer, AppState) {
    setup_with_static(std::path::Path::new("public")).await
}

fn contact_body() -> Value {
    json!({ "name": "A", "email": "a@x.com", "subject": "hi", "message": "hello" })
}

fn blog_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "excerpt": "short",
        "content": "long",
        "category": category,
    })
}

// ============================================================================
// Contacts
// ============================================================================

#[tokio::test]
async fn test_create_contact_ignores_client_status_and_timestamp() {
    let (server, _) = setup().await;
    let mut body = contact_body();
    body["status"] = json!("replied");
    body["createdAt"] = json!("2000-01-01T00:00:00.000Z");

    let response = server.post("/api/contacts").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Message received! Thank you for contacting us."));

    let contact: Contact = serde_json::from_value(body["contact"].clone()).unwrap();
    assert_eq!(contact.status, ContactStatus::New);
    assert_ne!(contact.created_at.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    assert!(contact.created_at.timestamp() > 946_684_800);
}

#[tokio::test]
async fn test_create_contact_missing_field_creates_nothing() {
    let (server, state) = setup().await;

    for field in ["name", "email", "subject", "message"] {
        let mut body = contact_body();
        body.as_object_mut().unwrap().remove(field);

        let response = server.post("/api/contacts").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "All fields are required" }));
    }

    let mut empty = contact_body();
    empty["subject"] = json!("");
    server
        .post("/api/contacts")
        .json(&empty)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(state.contacts.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_contact_accepts_whitespace_values() {
    let (server, state) = setup().await;
    let mut body = contact_body();
    body["name"] = json!(" ");

    let response = server.post("/api/contacts").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["contact"]["name"], json!(" "));
    assert_eq!(state.contacts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_get_missing_contact_is_not_found() {
    let (server, _) = setup().await;

    let response = server.get(&format!("/api/contacts/{}", Uuid::new_v4())).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Contact not found" }));
}

#[tokio::test]
async fn test_update_contact_status_validation() {
    let (server, _) = setup().await;
    let created: Value = server.post("/api/contacts").json(&contact_body()).await.json();
    let id = created["contact"]["_id"].as_str().unwrap().to_string();

    server
        .put(&format!("/api/contacts/{id}"))
        .json(&json!({ "status": "archived" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // No status leaves the record untouched
    let response = server.put(&format!("/api/contacts/{id}")).json(&json!({})).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Contact>().status, ContactStatus::New);

    server
        .put(&format!("/api/contacts/{}", Uuid::new_v4()))
        .json(&json!({ "status": "read" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_round_trip_scenario() {
    let (server, _) = setup().await;

    let response = server.post("/api/contacts").json(&contact_body()).await;
    response.assert_status(StatusCode::CREATED);

    let contacts: Vec<Contact> = server.get("/api/contacts").await.json();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].status, ContactStatus::New);
    let id = contacts[0].id;

    let response = server
        .put(&format!("/api/contacts/{id}"))
        .json(&json!({ "status": "replied" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Contact>().status, ContactStatus::Replied);

    let fetched: Contact = server.get(&format!("/api/contacts/{id}")).await.json();
    assert_eq!(fetched.status, ContactStatus::Replied);
    assert_eq!(fetched.name, "A");
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_listings_are_newest_first() {
    let (server, _) = setup().await;

    let mut contact_ids = Vec::new();
    let mut blog_ids = Vec::new();
    let mut gallery_ids = Vec::new();
    for i in 0..4 {
        let body: Value = server.post("/api/contacts").json(&contact_body()).await.json();
        contact_ids.push(body["contact"]["_id"].as_str().unwrap().to_string());

        let post: BlogPost = server
            .post("/api/blogs")
            .json(&blog_body(&format!("post {i}"), "blog"))
            .await
            .json();
        blog_ids.push(post.id.to_string());

        let item: GalleryItem = server.post("/api/gallery").json(&json!({})).await.json();
        gallery_ids.push(item.id.to_string());
    }
    contact_ids.reverse();
    blog_ids.reverse();
    gallery_ids.reverse();

    let contacts: Vec<Contact> = server.get("/api/contacts").await.json();
    assert_eq!(contacts.iter().map(|c| c.id.to_string()).collect::<Vec<_>>(), contact_ids);
    assert!(contacts.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let blogs: Vec<BlogPost> = server.get("/api/blogs").await.json();
    assert_eq!(blogs.iter().map(|b| b.id.to_string()).collect::<Vec<_>>(), blog_ids);

    let items: Vec<GalleryItem> = server.get("/api/gallery").await.json();
    assert_eq!(items.iter().map(|g| g.id.to_string()).collect::<Vec<_>>(), gallery_ids);
}

// ============================================================================
// Blogs
// ============================================================================

#[tokio::test]
async fn test_create_blog_applies_defaults() {
    let (server, _) = setup().await;

    let response = server
        .post("/api/blogs")
        .json(&json!({ "title": "T", "excerpt": "E", "content": "C" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let post: BlogPost = response.json();
    assert_eq!(post.author, "Raushan Kumar");
    assert_eq!(post.category, BlogCategory::Blog);
    assert!(!post.featured);
    assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn test_create_blog_without_required_field_is_server_error() {
    let (server, state) = setup().await;

    let response = server
        .post("/api/blogs")
        .json(&json!({ "excerpt": "E", "content": "C" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Server error" }));

    server
        .post("/api/blogs")
        .json(&json!({ "title": "", "excerpt": "E", "content": "C" }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(state.blogs.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_blog_rejects_unknown_category() {
    let (server, state) = setup().await;

    server
        .post("/api/blogs")
        .json(&blog_body("T", "cooking"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(state.blogs.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_blogs_category_filter() {
    let (server, _) = setup().await;
    for (title, category) in [("a", "opinions"), ("b", "blog"), ("c", "opinions"), ("d", "motivation")] {
        server
            .post("/api/blogs")
            .json(&blog_body(title, category))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let opinions: Vec<BlogPost> = server
        .get("/api/blogs")
        .add_query_param("category", "opinions")
        .await
        .json();
    assert_eq!(opinions.len(), 2);
    assert!(opinions.iter().all(|p| p.category == BlogCategory::Opinions));

    let unknown: Vec<BlogPost> = server
        .get("/api/blogs")
        .add_query_param("category", "cooking")
        .await
        .json();
    assert_eq!(unknown.len(), 4);

    let all: Vec<BlogPost> = server.get("/api/blogs").await.json();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_update_blog_merges_only_supplied_fields() {
    let (server, _) = setup().await;
    let created: BlogPost = server
        .post("/api/blogs")
        .json(&json!({
            "title": "Before",
            "excerpt": "E",
            "content": "C",
            "category": "motivation",
            "featured": true,
        }))
        .await
        .json();

    let response = server
        .put(&format!("/api/blogs/{}", created.id))
        .json(&json!({ "title": "X", "createdAt": "2000-01-01T00:00:00.000Z" }))
        .await;
    response.assert_status_ok();

    let updated: BlogPost = response.json();
    assert_eq!(updated.title, "X");
    assert_eq!(updated.excerpt, created.excerpt);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.author, created.author);
    assert_eq!(updated.category, BlogCategory::Motivation);
    assert!(updated.featured);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let fetched: BlogPost = server.get(&format!("/api/blogs/{}", created.id)).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_separate_partial_updates_both_persist() {
    let (server, _) = setup().await;
    let created: BlogPost = server.post("/api/blogs").json(&blog_body("T", "blog")).await.json();
    let path = format!("/api/blogs/{}", created.id);

    server
        .put(&path)
        .json(&json!({ "title": "New title" }))
        .await
        .assert_status_ok();
    server
        .put(&path)
        .json(&json!({ "featured": true }))
        .await
        .assert_status_ok();

    let fetched: BlogPost = server.get(&path).await.json();
    assert_eq!(fetched.title, "New title");
    assert!(fetched.featured);
}

#[tokio::test]
async fn test_update_deleted_blog_is_not_found() {
    let (server, _) = setup().await;
    let created: BlogPost = server.post("/api/blogs").json(&blog_body("T", "blog")).await.json();
    let path = format!("/api/blogs/{}", created.id);

    server.delete(&path).await.assert_status_ok();

    let response = server.put(&path).json(&json!({ "title": "X" })).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Blog not found" }));
}

#[tokio::test]
async fn test_missing_blog_is_not_found() {
    let (server, _) = setup().await;
    let id = Uuid::new_v4();

    let response = server.get(&format!("/api/blogs/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Blog not found" }));

    server
        .put(&format!("/api/blogs/{id}"))
        .json(&json!({ "title": "X" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_blog() {
    let (server, _) = setup().await;
    let post: BlogPost = server.post("/api/blogs").json(&blog_body("T", "blog")).await.json();

    let response = server.delete(&format!("/api/blogs/{}", post.id)).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Blog deleted" }));

    server
        .get(&format!("/api/blogs/{}", post.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Deleting again is still a success
    server
        .delete(&format!("/api/blogs/{}", post.id))
        .await
        .assert_status_ok();
}

// ============================================================================
// Gallery
// ============================================================================

#[tokio::test]
async fn test_create_gallery_item() {
    let (server, _) = setup().await;

    let response = server
        .post("/api/gallery")
        .json(&json!({ "title": "Beach", "imageUrl": "https://img.example/beach.jpg", "category": "places" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["imageUrl"], json!("https://img.example/beach.jpg"));
    assert_eq!(body["category"], json!("places"));
    assert!(body["_id"].is_string());
    assert!(body["createdAt"].is_string());

    let empty: GalleryItem = server.post("/api/gallery").json(&json!({})).await.json();
    assert_eq!(empty.category, GalleryCategory::Gallery);

    server
        .post("/api/gallery")
        .json(&json!({ "category": "pets" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_gallery_category_filter() {
    let (server, _) = setup().await;
    for category in ["family", "places", "family"] {
        server
            .post("/api/gallery")
            .json(&json!({ "category": category }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let family: Vec<GalleryItem> = server
        .get("/api/gallery")
        .add_query_param("category", "family")
        .await
        .json();
    assert_eq!(family.len(), 2);

    let all: Vec<GalleryItem> = server
        .get("/api/gallery")
        .add_query_param("category", "unknown")
        .await
        .json();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_delete_missing_gallery_item_succeeds() {
    let (server, _) = setup().await;

    let response = server.delete(&format!("/api/gallery/{}", Uuid::new_v4())).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Gallery item deleted" }));
}

// ============================================================================
// Errors, health, static files
// ============================================================================

#[tokio::test]
async fn test_malformed_id_is_server_error() {
    let (server, _) = setup().await;

    for path in ["/api/contacts/123", "/api/blogs/not-an-id"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Server error" }));
    }

    server
        .delete("/api/gallery/xyz")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (server, state) = setup().await;

    let response = server
        .post("/api/contacts")
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());

    server
        .post("/api/contacts")
        .text("name=A")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(state.contacts.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_health() {
    let (server, _) = setup().await;

    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "Server is running" }));
}

#[tokio::test]
async fn test_unknown_routes_are_not_found() {
    let (server, _) = setup().await;

    for path in ["/api/unknown", "/nope.html", "/api"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": "Route not found" }));
    }

    server
        .post("/somewhere")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_landing_page_falls_back_to_embedded_copy() {
    let dir = tempfile::tempdir().unwrap();
    let (server, _) = setup_with_static(dir.path()).await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Portfolio API"));
}

#[tokio::test]
async fn test_static_files_served_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>custom landing</h1>").unwrap();
    std::fs::create_dir(dir.path().join("css")).unwrap();
    std::fs::write(dir.path().join("css").join("site.css"), "body {}").unwrap();
    let (server, _) = setup_with_static(dir.path()).await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "<h1>custom landing</h1>");

    let response = server.get("/css/site.css").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/css");
    assert_eq!(response.text(), "body {}");

    server
        .get("/%2E%2E/Cargo.toml")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
