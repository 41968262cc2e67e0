pub mod models;
pub mod routes;
pub mod validate;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use gateway_client::{Backend, RemoteCallClient};
use gateway_kernel::{InitCtx, Module};

use models::{Book, User};

/// Library module: the gateway surface over the book and user services.
pub struct LibraryModule {
    client: Arc<RemoteCallClient>,
}

impl LibraryModule {
    pub fn new(client: Arc<RemoteCallClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Module for LibraryModule {
    fn name(&self) -> &'static str {
        "lib"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            book_service = %ctx.settings.backends.book.address,
            user_service = %ctx.settings.backends.user.address,
            "library module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .nest(
                "/books",
                routes::resource_router::<Book>(Backend::Book, self.client.clone()),
            )
            .nest(
                "/users",
                routes::resource_router::<User>(Backend::User, self.client.clone()),
            )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List all books in the library",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Book collection as returned by the book service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Book"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a new book to the library",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/Book"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Identifier assigned by the book service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Created"
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Backend failed or violated its contract",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Book as returned by the book service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Book"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "The book service does not know this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update an existing book",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/Book"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {"description": "Updated; no body"},
                            "400": {
                                "description": "Body id does not match the path id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete an existing book",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "responses": {
                            "200": {"description": "Deleted; no body"}
                        }
                    }
                },
                "/users": {
                    "get": {
                        "summary": "List all users in the library",
                        "tags": ["Users"],
                        "responses": {
                            "200": {
                                "description": "User collection as returned by the user service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/User"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a new user to the library",
                        "tags": ["Users"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/User"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Identifier assigned by the user service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Created"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/users/{id}": {
                    "get": {
                        "summary": "Get a user by id",
                        "tags": ["Users"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "User as returned by the user service",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/User"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "The user service does not know this id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update an existing user",
                        "tags": ["Users"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/User"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {"description": "Updated; no body"},
                            "400": {
                                "description": "Body id does not match the path id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete an existing user",
                        "tags": ["Users"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "integer", "format": "int64"}}
                        ],
                        "responses": {
                            "200": {"description": "Deleted; no body"}
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Assigned by the book service; omit on create"
                            },
                            "title": {
                                "type": "string"
                            },
                            "author": {
                                "$ref": "#/components/schemas/Author"
                            },
                            "category": {
                                "type": "string"
                            },
                            "isbn": {
                                "type": "integer",
                                "format": "int64"
                            },
                            "publisher": {
                                "$ref": "#/components/schemas/Publisher"
                            },
                            "publishedDate": {
                                "type": "string",
                                "format": "date"
                            },
                            "price": {
                                "type": "number",
                                "format": "double"
                            }
                        },
                        "required": ["title"]
                    },
                    "Author": {
                        "type": "object",
                        "properties": {
                            "code": {"type": "string"},
                            "name": {"type": "string"},
                            "address": {"type": "string"},
                            "phoneNumber": {"type": "string"}
                        }
                    },
                    "Publisher": {
                        "type": "object",
                        "properties": {
                            "code": {"type": "string"},
                            "name": {"type": "string"}
                        }
                    },
                    "User": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Assigned by the user service; omit on create"
                            },
                            "name": {"type": "string"},
                            "email": {"type": "string", "format": "email"},
                            "phoneNumber": {"type": "string"}
                        },
                        "required": ["name"]
                    },
                    "Created": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Identifier the backend assigned to the new entity"
                            }
                        },
                        "required": ["id"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "library module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "library module stopped");
        Ok(())
    }
}

/// Create a new instance of the library module
pub fn create_module(client: Arc<RemoteCallClient>) -> Arc<dyn Module> {
    Arc::new(LibraryModule::new(client))
}
