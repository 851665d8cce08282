//! End-to-end tests of the books endpoints through the assembled router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshelf_kernel::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(settings: &Settings) -> Router {
    let registry = bookshelf_app::build_registry(settings);
    bookshelf_http::build_router(&registry, settings)
}

fn app() -> Router {
    app_with(&Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn create(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().unwrap().to_string()
}

async fn listed_ids(app: &Router, uri: &str) -> Vec<String> {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_returns_id_and_success_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Moby", 200, 200, false))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert_eq!(body["data"]["bookId"].as_str().unwrap().len(), 16);
}

#[tokio::test]
async fn create_then_get_returns_full_record() {
    let app = app();
    let id = create(&app, book("Moby", 200, 200, true)).await;

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let record = &body["data"]["book"];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["name"], "Moby");
    assert_eq!(record["year"], 2010);
    assert_eq!(record["author"], "John Doe");
    assert_eq!(record["summary"], "Lorem ipsum dolor sit amet");
    assert_eq!(record["publisher"], "Dicoding Indonesia");
    assert_eq!(record["pageCount"], 200);
    assert_eq!(record["readPage"], 200);
    assert_eq!(record["finished"], true);
    assert_eq!(record["reading"], true);
    assert!(record["insertedAt"].is_string());
    assert_eq!(record["insertedAt"], record["updatedAt"]);

    let (_, again) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(again, body);
}

#[tokio::test]
async fn create_without_name_fails() {
    let app = app();
    let mut payload = book("x", 10, 1, false);
    payload.as_object_mut().unwrap().remove("name");

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Gagal menambahkan buku. Mohon isi nama buku"})
    );
    assert!(listed_ids(&app, "/books").await.is_empty());
}

#[tokio::test]
async fn create_with_read_page_beyond_page_count_fails() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(book("Moby", 10, 11, false))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
    assert!(listed_ids(&app, "/books").await.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_fail_envelope() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(json!({"name": "Moby", "pageCount": -5}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn list_filters_compose() {
    let app = app();
    let sea = create(&app, book("Sea", 10, 5, true)).await;
    let land = create(&app, book("Land", 10, 10, false)).await;

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(
        body["data"]["books"][0],
        json!({"id": sea, "name": "Sea", "publisher": "Dicoding Indonesia"})
    );

    assert_eq!(listed_ids(&app, "/books").await, vec![sea.clone(), land.clone()]);
    assert_eq!(listed_ids(&app, "/books?name=sea").await, vec![sea.clone()]);
    assert_eq!(listed_ids(&app, "/books?reading=1").await, vec![sea.clone()]);
    assert_eq!(listed_ids(&app, "/books?reading=0").await, vec![land.clone()]);
    assert_eq!(listed_ids(&app, "/books?finished=1").await, vec![land.clone()]);
    assert_eq!(listed_ids(&app, "/books?name=a&finished=0").await, vec![sea.clone()]);
    assert_eq!(
        listed_ids(&app, "/books?reading=yes").await,
        vec![sea.clone(), land.clone()]
    );
    assert!(listed_ids(&app, "/books?name=ocean").await.is_empty());
}

#[tokio::test]
async fn get_unknown_book_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/xxxxxxxxxxxxxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "Buku tidak ditemukan"}));
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let id = create(&app, book("Sea", 10, 5, true)).await;
    let uri = format!("/books/{}", id);
    let (_, before) = send(&app, Method::GET, &uri, None).await;

    let (status, body) = send(&app, Method::PUT, &uri, Some(book("Ocean", 300, 300, false))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "success", "message": "Buku berhasil diperbarui"})
    );

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    let record = &after["data"]["book"];
    assert_eq!(record["name"], "Ocean");
    assert_eq!(record["pageCount"], 300);
    assert_eq!(record["readPage"], 300);
    assert_eq!(record["reading"], false);
    assert_eq!(record["insertedAt"], before["data"]["book"]["insertedAt"]);
    // finished is not recomputed by default
    assert_eq!(record["finished"], false);
}

#[tokio::test]
async fn update_recomputes_finished_when_configured() {
    let mut settings = Settings::default();
    settings.books.recompute_finished_on_update = true;
    let app = app_with(&settings);

    let id = create(&app, book("Sea", 10, 5, true)).await;
    let uri = format!("/books/{}", id);
    send(&app, Method::PUT, &uri, Some(book("Sea", 10, 10, false))).await;

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(after["data"]["book"]["finished"], true);
}

#[tokio::test]
async fn update_failures_use_update_messages() {
    let app = app();
    let id = create(&app, book("Sea", 10, 5, true)).await;
    let uri = format!("/books/{}", id);

    let mut nameless = book("", 10, 5, true);
    nameless["name"] = Value::Null;
    let (status, body) = send(&app, Method::PUT, &uri, Some(nameless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(&app, Method::PUT, &uri, Some(book("Sea", 10, 20, true))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(book("Sea", 10, 5, true))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(after["data"]["book"]["readPage"], 5);
    assert_eq!(listed_ids(&app, "/books").await, vec![id]);
}

#[tokio::test]
async fn delete_removes_book() {
    let app = app();
    let id = create(&app, book("Sea", 10, 5, true)).await;
    let keep = create(&app, book("Land", 10, 5, true)).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "message": "Buku berhasil dihapus"}));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(listed_ids(&app, "/books").await, vec![keep]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn api_prefix_moves_module_routes() {
    let mut settings = Settings::default();
    settings.server.api_prefix = "/api".to_string();
    let app = app_with(&settings);

    assert!(listed_ids(&app, "/api/books").await.is_empty());
    let (status, _) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, spec) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/books"]["post"].is_object());
    assert!(spec["paths"]["/books/{bookId}"]["delete"].is_object());
    assert!(spec["components"]["schemas"]["Book"].is_object());
}
