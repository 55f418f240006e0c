use graphql_openapi::{
    build_curl, build_document, build_variables_example, build_variables_schema, render,
    DocumentOptions, OutputFormat,
};
use serde_json::{json, Value};

const SCHEMA: &str = r"
type Query {
    user(id: ID!): User
    users(filter: UserFilter, first: Int): [User!]!
}

type User {
    id: ID!
    name: String
}

enum Role {
    ADMIN
    MEMBER
}

input UserFilter {
    role: Role
    nameContains: String!
    createdAfter: DateTime
    and: [UserFilter!]
}

scalar DateTime
";

const QUERY: &str = r"
query {
    users { id }
}

query GetUser($id: ID!) {
    user(id: $id) { id name }
}

query ListUsers($filter: UserFilter, $first: Int = 10) {
    users(filter: $filter, first: $first) { id }
}
";

fn generate(operation_name: Option<&str>) -> Value {
    let types = graphql_hir::parse_schema(SCHEMA, "schema.graphql").unwrap();
    let operations = graphql_hir::parse_operations(QUERY, "query.graphql").unwrap();
    let operation = graphql_hir::select_operation(&operations, operation_name).unwrap();

    let variables = build_variables_schema(&types, operation);
    let example = build_variables_example(&types, operation).into();
    let document = build_document(
        &DocumentOptions::new("https://api.example.com/graphql"),
        operation,
        QUERY,
        &variables,
        example,
    )
    .unwrap();
    serde_json::to_value(document).unwrap()
}

fn request_body(document: &Value) -> &Value {
    &document["paths"]["/graphql"]["post"]["requestBody"]["content"]["application/json"]
}

#[test]
fn test_default_selection_uses_first_named_operation() {
    let document = generate(None);
    assert_eq!(
        document["paths"]["/graphql"]["post"]["summary"],
        "Invoke GraphQL operation GetUser"
    );

    let body = request_body(&document);
    assert_eq!(
        body["schema"]["properties"]["variables"],
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "description": "GraphQL ID" }
            },
            "required": ["id"]
        })
    );
    assert_eq!(body["example"]["variables"], json!({ "id": "id" }));
}

#[test]
fn test_input_object_variables() {
    let document = generate(Some("ListUsers"));
    let body = request_body(&document);
    let variables = &body["schema"]["properties"]["variables"];

    // Default values do not make a variable required
    assert!(variables.get("required").is_none());

    let filter = &variables["properties"]["filter"];
    assert_eq!(filter["type"], "object");
    assert_eq!(filter["required"], json!(["nameContains"]));
    assert_eq!(filter["properties"]["role"]["enum"], json!(["ADMIN", "MEMBER"]));
    assert_eq!(
        filter["properties"]["createdAfter"]["description"],
        "GraphQL custom scalar DateTime"
    );
    assert_eq!(
        filter["properties"]["and"]["items"]["description"],
        "Recursive reference to UserFilter"
    );

    assert_eq!(
        body["example"]["variables"],
        json!({
            "filter": {
                "role": "ADMIN",
                "nameContains": "string",
                "createdAfter": "string",
                "and": [{}]
            },
            "first": 0
        })
    );
}

#[test]
fn test_missing_operation_suggests_closest_name() {
    let operations = graphql_hir::parse_operations(QUERY, "query.graphql").unwrap();
    let err = graphql_hir::select_operation(&operations, Some("ListUser")).unwrap_err();
    assert!(err.to_string().contains("Did you mean 'ListUsers'?"), "{err}");
}

#[test]
fn test_generation_is_deterministic() {
    let first = render(&generate(Some("ListUsers")), OutputFormat::Yaml).unwrap();
    let second = render(&generate(Some("ListUsers")), OutputFormat::Yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rendered_formats_agree() {
    let document = generate(None);
    let yaml: Value =
        serde_yaml::from_str(&render(&document, OutputFormat::Yaml).unwrap()).unwrap();
    let json: Value =
        serde_json::from_str(&render(&document, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(yaml, json);
    assert_eq!(json["openapi"], "3.0.3");
}

#[test]
fn test_curl_for_selected_operation() {
    let types = graphql_hir::parse_schema(SCHEMA, "schema.graphql").unwrap();
    let query = "query GetUser($id: ID!) { user(id: $id) { name } }";
    let operations = graphql_hir::parse_operations(query, "query.graphql").unwrap();
    let operation = graphql_hir::select_operation(&operations, None).unwrap();
    let example: Value = build_variables_example(&types, operation).into();

    insta::assert_snapshot!(
        build_curl("https://api.example.com/graphql", query, &example),
        @r#"curl -X POST 'https://api.example.com/graphql' -H 'Content-Type: application/json' -d '{"query":"query GetUser($id: ID!) { user(id: $id) { name } }","variables":{"id":"id"}}'"#
    );
}
