pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::BooksSettings, InitCtx, Module};
use serde_json::json;

use store::{BookStore, SharedBookStore};

/// Books module: the in-memory shelf and its CRUD endpoints
pub struct BooksModule {
    store: SharedBookStore,
}

impl BooksModule {
    pub fn new(settings: &BooksSettings) -> Self {
        Self::with_store(
            BookStore::new()
                .recompute_finished_on_update(settings.recompute_finished_on_update)
                .into_shared(),
        )
    }

    pub fn with_store(store: SharedBookStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedBookStore {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            recompute_finished_on_update = ctx.settings.books.recompute_finished_on_update,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.lock().len(),
            "books module stopped"
        );
        Ok(())
    }
}

fn failure_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "$ref": "#/components/schemas/FailureResponse"
                }
            }
        }
    })
}

fn success_response(description: &str, data: Option<serde_json::Value>) -> serde_json::Value {
    let mut properties = json!({
        "status": {"type": "string", "enum": ["success"]},
        "message": {"type": "string"}
    });
    let mut required = vec!["status"];
    if let Some(data) = data {
        properties["data"] = data;
        required.push("data");
    }

    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": properties,
                    "required": required
                }
            }
        }
    })
}

fn book_id_parameter() -> serde_json::Value {
    json!({
        "name": "bookId",
        "in": "path",
        "required": true,
        "schema": {"type": "string"}
    })
}

fn query_flag(name: &str, description: &str) -> serde_json::Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": {"type": "string", "enum": ["0", "1"]}
    })
}

fn openapi_fragment() -> serde_json::Value {
    let book_payload_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": {"$ref": "#/components/schemas/BookPayload"}
            }
        }
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "name",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive substring of the book name",
                            "schema": {"type": "string"}
                        },
                        query_flag("reading", "1 for books being read, 0 for the others"),
                        query_flag("finished", "1 for finished books, 0 for the others")
                    ],
                    "responses": {
                        "200": success_response("Matching books", Some(json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": {"$ref": "#/components/schemas/BookSummary"}
                                }
                            },
                            "required": ["books"]
                        })))
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": book_payload_body.clone(),
                    "responses": {
                        "201": success_response("Book added", Some(json!({
                            "type": "object",
                            "properties": {"bookId": {"type": "string"}},
                            "required": ["bookId"]
                        }))),
                        "400": failure_response("Missing name or readPage greater than pageCount"),
                        "500": failure_response("Book could not be stored")
                    }
                }
            },
            "/{bookId}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": success_response("The book", Some(json!({
                            "type": "object",
                            "properties": {"book": {"$ref": "#/components/schemas/Book"}},
                            "required": ["book"]
                        }))),
                        "404": failure_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "requestBody": book_payload_body,
                    "responses": {
                        "200": success_response("Book updated", None),
                        "400": failure_response("Missing name or readPage greater than pageCount"),
                        "404": failure_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_parameter()],
                    "responses": {
                        "200": success_response("Book deleted", None),
                        "404": failure_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string", "description": "Unique 16-character identifier"},
                        "name": {"type": "string"},
                        "year": {"type": "integer"},
                        "author": {"type": "string"},
                        "summary": {"type": "string"},
                        "publisher": {"type": "string"},
                        "pageCount": {"type": "integer", "minimum": 0},
                        "readPage": {"type": "integer", "minimum": 0},
                        "finished": {"type": "boolean"},
                        "reading": {"type": "boolean"},
                        "insertedAt": {"type": "string", "format": "date-time"},
                        "updatedAt": {"type": "string", "format": "date-time"}
                    },
                    "required": [
                        "id", "name", "year", "author", "summary", "publisher",
                        "pageCount", "readPage", "finished", "reading",
                        "insertedAt", "updatedAt"
                    ]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "minLength": 1},
                        "year": {"type": "integer"},
                        "author": {"type": "string"},
                        "summary": {"type": "string"},
                        "publisher": {"type": "string"},
                        "pageCount": {"type": "integer", "minimum": 0},
                        "readPage": {"type": "integer", "minimum": 0},
                        "reading": {"type": "boolean"}
                    },
                    "required": ["name"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string"},
                        "name": {"type": "string"},
                        "publisher": {"type": "string"}
                    },
                    "required": ["id", "name", "publisher"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(settings: &BooksSettings) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(settings))
}
