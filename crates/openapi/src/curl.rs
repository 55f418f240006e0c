//! Example `curl` invocation for the wrapped operation.

use serde_json::Value;

/// Build a single-line POSIX shell command that posts the operation.
///
/// The body is compact JSON with `query` first and `variables` second.
#[must_use]
pub fn build_curl(endpoint: &str, query: &str, variables: &Value) -> String {
    let body = serde_json::json!({
        "query": query,
        "variables": variables,
    });

    format!(
        "curl -X POST {} -H {} -d {}",
        shell_quote(endpoint),
        shell_quote("Content-Type: application/json"),
        shell_quote(&body.to_string())
    )
}

/// Wrap `arg` in single quotes, closing and reopening around embedded ones.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_curl_line() {
        let curl = build_curl(
            "http://localhost:4000/graphql",
            "query Me { me { name } }",
            &json!({ "first": 10 }),
        );
        insta::assert_snapshot!(curl, @r#"curl -X POST 'http://localhost:4000/graphql' -H 'Content-Type: application/json' -d '{"query":"query Me { me { name } }","variables":{"first":10}}'"#);
    }

    #[test]
    fn test_single_quotes_are_escaped() {
        let curl = build_curl(
            "http://localhost/graphql",
            "{ search(q: \"it's\") { id } }",
            &json!({}),
        );
        insta::assert_snapshot!(curl, @r#"curl -X POST 'http://localhost/graphql' -H 'Content-Type: application/json' -d '{"query":"{ search(q: \"it'\''s\") { id } }","variables":{}}'"#);
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("a'b"), r"'a'\''b'");
        assert_eq!(shell_quote(""), "''");
    }
}
