//! Response formatting.
//!
//! Explorer responses are rendered to a single text block. Every tool
//! pretty-prints the JSON body except `search`, which gets a compact
//! listing of its hits.

use serde_json::Value;

const NO_RESULTS: &str = "No results found.";

/// Search hit fields, in display order.
const SEARCH_FIELDS: [(&str, &str); 5] = [
    ("name", "Name"),
    ("type", "Type"),
    ("address", "Address"),
    ("symbol", "Symbol"),
    ("token_type", "Token Type"),
];

const VERIFIED_FIELD: &str = "is_smart_contract_verified";

/// How a decoded response body is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Pretty-printed JSON with two-space indentation.
    #[default]
    Pretty,
    /// Human-readable list of search hits.
    SearchResults,
}

impl ResponseFormat {
    pub fn render(self, body: &Value) -> String {
        match self {
            Self::Pretty => pretty(body),
            Self::SearchResults => search_results(body),
        }
    }
}

fn pretty(body: &Value) -> String {
    // Serializing a `Value` cannot fail: map keys are always strings.
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

fn search_results(body: &Value) -> String {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        return NO_RESULTS.to_string();
    };

    let blocks: Vec<String> = items.iter().map(search_item).collect();
    let joined = blocks.join("\n\n");

    if joined.is_empty() {
        NO_RESULTS.to_string()
    } else {
        format!("Found {} results:\n\n{}", items.len(), joined)
    }
}

fn search_item(item: &Value) -> String {
    let mut lines: Vec<String> = SEARCH_FIELDS
        .iter()
        .filter_map(|(field, label)| {
            item.get(*field)
                .filter(|value| truthy(value))
                .map(|value| format!("{}: {}", label, display(value)))
        })
        .collect();

    if item.get(VERIFIED_FIELD).is_some_and(truthy) {
        lines.push("Verified Contract".to_string());
    }

    lines.join("\n")
}

/// Loose truthiness: null, false, zero and empty strings count as absent.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_single_hit() {
        let body = json!({ "items": [{ "name": "Foo", "address": "0xabc" }] });
        assert_eq!(
            ResponseFormat::SearchResults.render(&body),
            "Found 1 results:\n\nName: Foo\nAddress: 0xabc"
        );
    }

    #[test]
    fn test_search_field_order_and_verified_marker() {
        let body = json!({
            "items": [
                {
                    "token_type": "ERC-20",
                    "symbol": "USDT",
                    "address": "0xdac1",
                    "type": "token",
                    "name": "Tether USD",
                    "is_smart_contract_verified": true
                },
                { "type": "address", "address": "0x0", "is_smart_contract_verified": false }
            ]
        });

        assert_eq!(
            ResponseFormat::SearchResults.render(&body),
            "Found 2 results:\n\n\
             Name: Tether USD\nType: token\nAddress: 0xdac1\nSymbol: USDT\nToken Type: ERC-20\nVerified Contract\n\n\
             Type: address\nAddress: 0x0"
        );
    }

    #[test]
    fn test_search_skips_null_and_empty_fields() {
        let body = json!({ "items": [{ "name": null, "symbol": "", "address": "0x1" }] });
        assert_eq!(
            ResponseFormat::SearchResults.render(&body),
            "Found 1 results:\n\nAddress: 0x1"
        );
    }

    #[test]
    fn test_search_no_results() {
        for body in [
            json!({ "items": [] }),
            json!({}),
            json!({ "items": "nope" }),
            json!([1, 2, 3]),
            json!({ "items": [{}] }),
        ] {
            assert_eq!(ResponseFormat::SearchResults.render(&body), "No results found.");
        }
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let body = json!({ "hash": "0xabc", "block": { "number": 1 } });
        assert_eq!(
            ResponseFormat::Pretty.render(&body),
            "{\n  \"hash\": \"0xabc\",\n  \"block\": {\n    \"number\": 1\n  }\n}"
        );
    }

    #[test]
    fn test_pretty_preserves_key_order() {
        let body: Value = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let rendered = ResponseFormat::Pretty.render(&body);
        let z = rendered.find("\"z\"").unwrap();
        let a = rendered.find("\"a\"").unwrap();
        let m = rendered.find("\"m\"").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn test_pretty_is_idempotent() {
        let body = json!({
            "items": [{ "value": "1000000000000000000", "fee": { "type": "actual" } }],
            "next_page_params": null
        });

        let first = ResponseFormat::Pretty.render(&body);
        let reparsed: Value = serde_json::from_str(&first).unwrap();
        let second = ResponseFormat::Pretty.render(&reparsed);
        assert_eq!(first, second);
    }
}
