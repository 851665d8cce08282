//! OpenAPI document assembled from the fragments each module contributes.

use serde_json::{json, Value};

use bookshelf_kernel::ModuleRegistry;

/// Path a module's routes are nested under.
pub fn module_path(api_prefix: &str, module_name: &str) -> String {
    format!("{}/{}", api_prefix.trim_end_matches('/'), module_name)
}

/// Build the merged OpenAPI document for all registered modules.
pub fn collect(registry: &ModuleRegistry, api_prefix: &str) -> Value {
    let mut openapi_spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Bookshelf API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "In-memory bookshelf API"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["FailureResponse"] = json!({
        "type": "object",
        "properties": {
            "status": {
                "type": "string",
                "enum": ["fail", "error"]
            },
            "message": {
                "type": "string"
            }
        },
        "required": ["status", "message"]
    });

    openapi_spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };
        let base = module_path(api_prefix, module.name());

        if let Some(paths) = module_spec.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                // A module's "/" is its base path itself
                let prefixed_path = if path == "/" {
                    base.clone()
                } else {
                    format!("{}{}", base, path)
                };
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookshelf_kernel::Module;
    use std::sync::Arc;

    struct ShelfModule;

    #[async_trait]
    impl Module for ShelfModule {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": {
                    "/": {"get": {"summary": "List shelves"}},
                    "/{shelfId}": {"get": {"summary": "Get shelf"}}
                },
                "components": {"schemas": {"Shelf": {"type": "object"}}}
            }))
        }
    }

    #[test]
    fn module_paths_are_prefixed() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(ShelfModule));

        let spec = collect(&registry, "/api/");
        assert!(spec["paths"]["/api/shelves"].is_object());
        assert!(spec["paths"]["/api/shelves/{shelfId}"].is_object());
        assert!(spec["paths"]["/healthz"].is_object());
        assert!(spec["components"]["schemas"]["Shelf"].is_object());
        assert!(spec["components"]["schemas"]["FailureResponse"].is_object());
    }

    #[test]
    fn empty_prefix_mounts_at_root() {
        assert_eq!(module_path("", "books"), "/books");
        assert_eq!(module_path("/v1", "books"), "/v1/books");
    }
}
