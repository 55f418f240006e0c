//! OpenAPI 3.0 wrapper document for a single GraphQL operation.
//!
//! The document describes one `POST` endpoint whose body is the standard
//! GraphQL-over-HTTP envelope (`query` plus `variables`).

use crate::error::{OpenApiError, Result};
use crate::json_schema::SchemaNode;
use crate::variables::VariablesSchema;
use graphql_hir::OperationStructure;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub const OPENAPI_VERSION: &str = "3.0.3";
pub const DEFAULT_TITLE: &str = "GraphQL as REST";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_PATH: &str = "/graphql";

const CONTENT_TYPE_JSON: &str = "application/json";
const INFO_DESCRIPTION: &str = "Auto-generated from GraphQL query.\n\nThis endpoint wraps the GraphQL operation as a REST-like POST.";
const OPERATION_DESCRIPTION: &str = "Send the GraphQL query and variables as JSON.";

/// User-facing knobs for the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub title: String,
    pub version: String,
    pub endpoint: String,
}

impl DocumentOptions {
    /// Options with the default title and version.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            endpoint: endpoint.into(),
        }
    }
}

/// An endpoint URL split into its server origin and request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub server_url: String,
    pub path: String,
}

/// Split an endpoint URL into `scheme://host[:port]` and a path.
///
/// An empty or root path becomes `/graphql`.
pub fn parse_endpoint(endpoint: &str) -> Result<Endpoint> {
    let invalid = |reason: String| OpenApiError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason,
    };

    let url = url::Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("missing host".to_string()))?;

    let server_url = match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    };
    let path = match url.path() {
        "" | "/" => DEFAULT_PATH.to_string(),
        path => path.to_string(),
    };

    Ok(Endpoint { server_url, path })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathItem {
    pub post: Operation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: String,
    pub description: String,
    pub request_body: RequestBody,
    pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: SchemaNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    pub content: IndexMap<String, MediaType>,
}

/// Assemble the wrapper document for `operation`.
///
/// `example_variables` is embedded verbatim as the `variables` member of the
/// request body example.
#[tracing::instrument(skip_all, fields(operation = operation.display_name(), endpoint = %options.endpoint))]
pub fn build_document(
    options: &DocumentOptions,
    operation: &OperationStructure,
    query: &str,
    variables: &VariablesSchema,
    example_variables: Value,
) -> Result<OpenApiDocument> {
    let endpoint = parse_endpoint(&options.endpoint)?;
    tracing::debug!(server = %endpoint.server_url, path = %endpoint.path, "Parsed endpoint");

    let request_schema = SchemaNode::object()
        .with_property("query", SchemaNode::string(), true)
        .with_property("variables", variables.schema.clone(), false);

    let request_example = serde_json::json!({
        "query": query,
        "variables": example_variables,
    });

    let post = Operation {
        summary: format!("Invoke GraphQL operation {}", operation.display_name()),
        description: OPERATION_DESCRIPTION.to_string(),
        request_body: RequestBody {
            required: true,
            content: json_content(request_schema, Some(request_example)),
        },
        responses: IndexMap::from([(
            "200".to_string(),
            Response {
                description: "OK".to_string(),
                content: json_content(response_schema(), None),
            },
        )]),
    };

    Ok(OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: options.title.clone(),
            version: options.version.clone(),
            description: INFO_DESCRIPTION.to_string(),
        },
        servers: vec![Server {
            url: endpoint.server_url,
        }],
        paths: IndexMap::from([(endpoint.path, PathItem { post })]),
    })
}

fn json_content(schema: SchemaNode, example: Option<Value>) -> IndexMap<String, MediaType> {
    IndexMap::from([(CONTENT_TYPE_JSON.to_string(), MediaType { schema, example })])
}

/// `{ data: object, errors: [object] }`
fn response_schema() -> SchemaNode {
    SchemaNode::object()
        .with_property("data", SchemaNode::object(), false)
        .with_property("errors", SchemaNode::array(SchemaNode::object()), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::build_variables_schema;
    use serde_json::json;

    #[test]
    fn test_parse_endpoint_keeps_path_and_port() {
        let endpoint = parse_endpoint("https://api.example.com:8443/v1/graphql").unwrap();
        assert_eq!(endpoint.server_url, "https://api.example.com:8443");
        assert_eq!(endpoint.path, "/v1/graphql");
    }

    #[test]
    fn test_parse_endpoint_defaults_path() {
        for raw in ["http://localhost:4000", "http://localhost:4000/"] {
            let endpoint = parse_endpoint(raw).unwrap();
            assert_eq!(endpoint.server_url, "http://localhost:4000");
            assert_eq!(endpoint.path, DEFAULT_PATH);
        }
    }

    #[test]
    fn test_parse_endpoint_rejects_garbage() {
        for raw in ["not a url", "mailto:someone@example.com", ""] {
            let err = parse_endpoint(raw).unwrap_err();
            assert!(
                matches!(err, OpenApiError::InvalidEndpoint { ref url, .. } if url == raw),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_document_envelope() {
        let schema = graphql_hir::parse_schema("input Filter { q: String }", "s.graphql").unwrap();
        let query = "query Search($filter: Filter, $limit: Int!) { search { id } }";
        let operation = graphql_hir::parse_operations(query, "q.graphql")
            .unwrap()
            .remove(0);
        let variables = build_variables_schema(&schema, &operation);

        let options = DocumentOptions::new("http://localhost:4000/graphql");
        let document = build_document(
            &options,
            &operation,
            query,
            &variables,
            json!({ "limit": 5 }),
        )
        .unwrap();

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["openapi"], "3.0.3");
        assert_eq!(value["info"]["title"], DEFAULT_TITLE);
        assert_eq!(value["info"]["version"], DEFAULT_VERSION);
        assert_eq!(value["servers"], json!([{ "url": "http://localhost:4000" }]));

        let post = &value["paths"]["/graphql"]["post"];
        assert_eq!(post["summary"], "Invoke GraphQL operation Search");
        assert_eq!(post["requestBody"]["required"], true);

        let body = &post["requestBody"]["content"]["application/json"];
        assert_eq!(body["schema"]["required"], json!(["query"]));
        assert_eq!(body["schema"]["properties"]["query"], json!({ "type": "string" }));
        assert_eq!(
            body["schema"]["properties"]["variables"]["required"],
            json!(["limit"])
        );
        assert_eq!(
            body["example"],
            json!({ "query": query, "variables": { "limit": 5 } })
        );

        let ok = &post["responses"]["200"];
        assert_eq!(ok["description"], "OK");
        assert_eq!(
            ok["content"]["application/json"]["schema"],
            json!({
                "type": "object",
                "properties": {
                    "data": { "type": "object" },
                    "errors": { "type": "array", "items": { "type": "object" } }
                }
            })
        );
        assert!(ok["content"]["application/json"].get("example").is_none());
    }

    #[test]
    fn test_anonymous_operation_summary() {
        let schema = graphql_hir::SchemaTypes::default();
        let operation = graphql_hir::parse_operations("{ ping }", "q.graphql")
            .unwrap()
            .remove(0);
        let variables = build_variables_schema(&schema, &operation);
        let options = DocumentOptions {
            title: "Ping".to_string(),
            version: "2.0.0".to_string(),
            endpoint: "http://localhost/".to_string(),
        };

        let document =
            build_document(&options, &operation, "{ ping }", &variables, json!({})).unwrap();
        let post = &document.paths["/graphql"].post;
        assert_eq!(post.summary, "Invoke GraphQL operation (anonymous)");
        assert_eq!(document.info.title, "Ping");
        assert_eq!(document.servers[0].url, "http://localhost");
    }

    #[test]
    fn test_invalid_endpoint_fails_assembly() {
        let schema = graphql_hir::SchemaTypes::default();
        let operation = graphql_hir::parse_operations("{ ping }", "q.graphql")
            .unwrap()
            .remove(0);
        let variables = build_variables_schema(&schema, &operation);
        let result = build_document(
            &DocumentOptions::new("localhost:4000"),
            &operation,
            "{ ping }",
            &variables,
            json!({}),
        );
        assert!(matches!(result, Err(OpenApiError::InvalidEndpoint { .. })));
    }
}
