//! Tolerant JSON extraction for LLM responses.
//!
//! Providers often wrap JSON in markdown fences, surround it with
//! conversational text, or leave a trailing comma behind. Recovery runs as a
//! short chain of pure steps, each tried only when the previous one failed:
//!
//! 1. [`strip_code_fences`] removes a leading/trailing fence marker
//! 2. [`slice_outer_braces`] takes the first `{` to the last `}`
//! 3. [`parse_candidate`] parses strictly, then after [`repair_trailing_commas`]
//! 4. [`regex_object_span`] searches the whole input for a `{...}` span and
//!    repeats step 3 on it
//!
//! Nothing here panics or returns an error; failure is an empty
//! [`JsonExtraction`] that still carries the best candidate text, if any.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;
use tracing::debug;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*```[a-z0-9_+-]*\s*").expect("Invalid regex"));

static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\s*$").expect("Invalid regex"));

static TRAILING_COMMA_BRACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("Invalid regex"));

static TRAILING_COMMA_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("Invalid regex"));

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("Invalid regex"));

/// Outcome of [`extract_json_object`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonExtraction {
    /// The parsed object, when any candidate parsed.
    pub value: Option<Value>,
    /// The text that parsed (after repair), or the best unparseable
    /// candidate for diagnostics. `None` if no `{...}` was ever found.
    pub json_text: Option<String>,
}

impl JsonExtraction {
    pub fn is_parsed(&self) -> bool {
        self.value.is_some()
    }
}

/// Extract a JSON object embedded in free-form completion text.
pub fn extract_json_object(text: &str) -> JsonExtraction {
    if text.trim().is_empty() {
        return JsonExtraction::default();
    }

    let stripped = strip_code_fences(text);
    let mut best_candidate: Option<String> = None;

    if let Some(candidate) = slice_outer_braces(&stripped) {
        if let Some((value, json_text)) = parse_candidate(candidate) {
            return JsonExtraction {
                value: Some(value),
                json_text: Some(json_text),
            };
        }
        debug!("Outer-brace candidate did not parse, trying regex span");
        best_candidate = Some(candidate.to_string());
    }

    if let Some(candidate) = regex_object_span(text) {
        if let Some((value, json_text)) = parse_candidate(candidate) {
            return JsonExtraction {
                value: Some(value),
                json_text: Some(json_text),
            };
        }
        debug!("Regex span candidate did not parse");
        best_candidate.get_or_insert_with(|| candidate.to_string());
    }

    JsonExtraction {
        value: None,
        json_text: best_candidate,
    }
}

/// Trim the text and drop a leading ```` ``` ```` marker (with an optional
/// language tag, any case) and a trailing one.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    TRAILING_FENCE.replace(&without_leading, "").into_owned()
}

/// The substring from the first `{` through the last `}`, if the last
/// follows the first.
pub fn slice_outer_braces(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    if last > first {
        Some(&text[first..=last])
    } else {
        None
    }
}

/// Remove a comma (and any whitespace after it) that directly precedes a
/// closing `}` or `]`.
pub fn repair_trailing_commas(candidate: &str) -> String {
    let repaired = TRAILING_COMMA_BRACE.replace_all(candidate, "}");
    TRAILING_COMMA_BRACKET.replace_all(&repaired, "]").into_owned()
}

/// Parse a candidate strictly, then once more after comma repair.
///
/// Returns the value together with the exact text that parsed.
pub fn parse_candidate(candidate: &str) -> Option<(Value, String)> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Some((value, candidate.to_string())),
        Err(strict_err) => {
            let repaired = repair_trailing_commas(candidate);
            match serde_json::from_str::<Value>(&repaired) {
                Ok(value) => {
                    debug!("Parsed JSON after trailing-comma repair ({})", strict_err);
                    Some((value, repaired))
                }
                Err(e) => {
                    debug!("Candidate is not valid JSON: {}", e);
                    None
                }
            }
        }
    }
}

/// Greedy `{...}` span over the whole text.
pub fn regex_object_span(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_from_markdown() {
        let response = "```json\n{\"price_range\": \"₹100-₹200\"}\n```";
        let extraction = extract_json_object(response);
        assert_eq!(extraction.value, Some(json!({"price_range": "₹100-₹200"})));
        assert_eq!(
            extraction.json_text.as_deref(),
            Some(r#"{"price_range": "₹100-₹200"}"#)
        );
    }

    #[test]
    fn test_extract_raw_json() {
        let extraction = extract_json_object(r#"{"entries": []}"#);
        assert_eq!(extraction.value, Some(json!({"entries": []})));
        assert_eq!(extraction.json_text.as_deref(), Some(r#"{"entries": []}"#));
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Here is the result: {"entries": []} Hope this helps!"#;
        let extraction = extract_json_object(response);
        assert!(extraction.value.unwrap()["entries"].is_array());
    }

    #[test]
    fn test_extract_deeply_nested_json() {
        let response = r#"Result: {"a": [{"b": {"c": {"name": "John"}}}]} done"#;
        let value = extract_json_object(response).value.unwrap();
        assert_eq!(value["a"][0]["b"]["c"]["name"], "John");
    }

    #[test]
    fn test_extract_json_with_braces_in_strings() {
        let response = r#"{"msg": "use { and } carefully"}"#;
        let value = extract_json_object(response).value.unwrap();
        assert_eq!(value["msg"], "use { and } carefully");
    }

    #[test]
    fn test_extract_repairs_trailing_comma_in_object() {
        let response = "{\"price_range\": \"₹1-₹2\",\n}";
        let extraction = extract_json_object(response);
        assert_eq!(extraction.value, Some(json!({"price_range": "₹1-₹2"})));
        assert_eq!(extraction.json_text.as_deref(), Some("{\"price_range\": \"₹1-₹2\"}"));
    }

    #[test]
    fn test_extract_repairs_trailing_comma_in_array() {
        let response = r#"{"tags": ["a", "b", ]}"#;
        let value = extract_json_object(response).value.unwrap();
        assert_eq!(value["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_extract_no_braces_returns_nothing() {
        let extraction = extract_json_object("This is just plain text with no JSON");
        assert_eq!(extraction, JsonExtraction::default());
    }

    #[test]
    fn test_extract_empty_input_returns_nothing() {
        assert_eq!(extract_json_object(""), JsonExtraction::default());
        assert_eq!(extract_json_object("   \n"), JsonExtraction::default());
    }

    #[test]
    fn test_extract_only_closing_braces() {
        assert_eq!(extract_json_object("}} {{"), JsonExtraction::default());
    }

    #[test]
    fn test_extract_unparseable_keeps_candidate() {
        let response = r#"Sure! {"price_range": "₹5-₹9", oops} Thanks"#;
        let extraction = extract_json_object(response);
        assert!(!extraction.is_parsed());
        assert_eq!(
            extraction.json_text.as_deref(),
            Some(r#"{"price_range": "₹5-₹9", oops}"#)
        );
    }

    #[test]
    fn test_extract_empty_code_block() {
        let extraction = extract_json_object("```json\n```");
        assert_eq!(extraction, JsonExtraction::default());
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  ```JSON {}```  "), "{}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("no fences here"), "no fences here");
    }

    #[test]
    fn test_strip_code_fences_keeps_inner_prose() {
        let text = "Here you go:\n```json\n{}\n```";
        // Prose before the fence means there is no leading fence to strip.
        assert_eq!(strip_code_fences(text), "Here you go:\n```json\n{}");
    }

    #[test]
    fn test_slice_outer_braces() {
        assert_eq!(slice_outer_braces("a {x} b {y} c"), Some("{x} b {y}"));
        assert_eq!(slice_outer_braces("} then {"), None);
        assert_eq!(slice_outer_braces("no braces"), None);
        assert_eq!(slice_outer_braces("{"), None);
    }

    #[test]
    fn test_repair_trailing_commas() {
        assert_eq!(repair_trailing_commas(r#"{"a": 1,}"#), r#"{"a": 1}"#);
        assert_eq!(repair_trailing_commas("[1, 2,\n  ]"), "[1, 2]");
        assert_eq!(repair_trailing_commas(r#"{"a": [1,], "b": 2 ,  }"#), r#"{"a": [1], "b": 2 }"#);
        assert_eq!(repair_trailing_commas(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_parse_candidate_strict_then_repaired() {
        let (value, text) = parse_candidate(r#"{"a": 1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(text, r#"{"a": 1}"#);

        let (value, text) = parse_candidate(r#"{"a": 1,}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(text, r#"{"a": 1}"#);

        assert!(parse_candidate(r#"{"a": }"#).is_none());
    }

    #[test]
    fn test_regex_object_span_is_greedy() {
        assert_eq!(regex_object_span("x {a} y {b} z"), Some("{a} y {b}"));
        assert_eq!(regex_object_span("{\n  \"a\": 1\n}"), Some("{\n  \"a\": 1\n}"));
        assert_eq!(regex_object_span("nothing"), None);
    }
}
