//! Price suggestion pipeline: prompt, completion, extraction, comparison.

pub mod prompt;
pub mod query;
pub mod range;
pub mod suggestion;
pub mod verdict;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::llm::{CompletionError, CompletionRouter, RawCompletion};

pub use prompt::build_prompt;
pub use query::{Category, Condition, ProductQuery, infer_brand};
pub use range::{PriceInterval, parse_range};
pub use suggestion::{PriceSuggestion, Reasoning, ReasoningKey, extract_suggestion};
pub use verdict::{Verdict, classify};

/// Everything produced for one request.
#[derive(Debug)]
pub struct PriceReport {
    pub completion: RawCompletion,
    /// `None` when no JSON object could be recovered from the completion.
    pub suggestion: Option<PriceSuggestion>,
    /// Normalized JSON text, or the unparseable candidate for diagnostics.
    pub json_text: Option<String>,
    pub interval: PriceInterval,
    pub verdict: Verdict,
}

impl PriceReport {
    /// Build a report from a completion already obtained for `query`.
    pub fn from_completion(query: &ProductQuery, completion: RawCompletion) -> Self {
        let (suggestion, json_text) = extract_suggestion(&completion.text);

        let interval = match &suggestion {
            Some(s) => parse_range(&s.price_range),
            None => {
                warn!(
                    "Could not extract JSON from {} completion ({} chars)",
                    completion.provider,
                    completion.text.len()
                );
                PriceInterval::UNAVAILABLE
            }
        };
        let verdict = classify(query.asking_price, &interval);
        debug!("Interval {} for asking price {}: {}", interval, query.asking_price, verdict);

        Self {
            completion,
            suggestion,
            json_text,
            interval,
            verdict,
        }
    }

    /// Machine-readable rendering of the report.
    pub fn to_json(&self) -> Value {
        let reasoning = match self.suggestion.as_ref().map(|s| &s.reasoning) {
            Some(Reasoning::Breakdown(entries)) => {
                let map: Map<String, Value> = entries
                    .iter()
                    .map(|(k, v)| (k.as_str().to_string(), Value::String(v.clone())))
                    .collect();
                Value::Object(map)
            }
            Some(Reasoning::Freeform(text)) => Value::String(text.clone()),
            Some(Reasoning::Missing) | None => Value::Null,
        };

        let raw = match self.suggestion {
            Some(_) => Value::Null,
            None => Value::String(self.completion.text.clone()),
        };

        json!({
            "provider": self.completion.provider,
            "tier": self.completion.tier.as_str(),
            "extracted": self.suggestion.is_some(),
            "price_range": self.suggestion.as_ref().map(|s| s.price_range.clone()),
            "reasoning": reasoning,
            "json_text": self.json_text,
            "min": self.interval.min,
            "max": self.interval.max,
            "verdict": self.verdict.as_str(),
            "raw": raw,
        })
    }
}

/// Run the full pipeline for one product query.
///
/// Only a total provider failure is an error; an unparseable completion is
/// reported through [`PriceReport::suggestion`] being `None`.
pub async fn suggest_price(
    router: &CompletionRouter,
    query: &ProductQuery,
) -> Result<PriceReport, CompletionError> {
    let prompt = build_prompt(query);
    let completion = router.complete(&prompt).await?;
    Ok(PriceReport::from_completion(query, completion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Tier;

    fn query(asking_price: f64) -> ProductQuery {
        ProductQuery::new(
            "MacBook Air M1",
            Category::Laptop,
            "Apple",
            Condition::Good,
            18,
            asking_price,
        )
        .unwrap()
    }

    fn completion(text: &str) -> RawCompletion {
        RawCompletion {
            text: text.to_string(),
            tier: Tier::Primary,
            provider: "Gemini",
            primary_error: None,
        }
    }

    #[test]
    fn test_report_in_range() {
        let text = r#"{"price_range": "₹55,000 - ₹62,000", "reasoning": {"conclusion": "Fair"}}"#;
        let report = PriceReport::from_completion(&query(60000.0), completion(text));

        assert_eq!(report.interval, PriceInterval::new(55000, 62000));
        assert_eq!(report.verdict, Verdict::InRange);
        assert_eq!(report.suggestion.unwrap().price_range, "₹55,000 - ₹62,000");
    }

    #[test]
    fn test_report_without_json_keeps_raw_text() {
        let report = PriceReport::from_completion(&query(1.0), completion("Sorry, I can't help."));

        assert!(report.suggestion.is_none());
        assert!(report.json_text.is_none());
        assert_eq!(report.verdict, Verdict::Unavailable);
        assert_eq!(report.to_json()["raw"], "Sorry, I can't help.");
        assert_eq!(report.to_json()["extracted"], false);
        assert!(report.to_json()["json_text"].is_null());
    }

    #[test]
    fn test_report_keeps_unparseable_candidate() {
        let text = r#"Estimate: {"price_range": "x" oops} done"#;
        let report = PriceReport::from_completion(&query(1.0), completion(text));
        let value = report.to_json();

        assert!(report.suggestion.is_none());
        assert_eq!(report.json_text.as_deref(), Some(r#"{"price_range": "x" oops}"#));
        assert_eq!(value["extracted"], false);
        assert_eq!(value["json_text"], r#"{"price_range": "x" oops}"#);
        assert_eq!(value["raw"], text);
    }

    #[test]
    fn test_report_missing_price_range_is_unavailable() {
        let report =
            PriceReport::from_completion(&query(1.0), completion(r#"{"reasoning": {"conclusion": "?"}}"#));

        assert!(report.suggestion.is_some());
        assert_eq!(report.interval, PriceInterval::UNAVAILABLE);
        assert_eq!(report.verdict, Verdict::Unavailable);
    }

    #[test]
    fn test_to_json_shape() {
        let text = r#"{"price_range": "₹1-₹2", "reasoning": {"brand_factor": "b"}}"#;
        let value = PriceReport::from_completion(&query(5.0), completion(text)).to_json();

        assert_eq!(value["provider"], "Gemini");
        assert_eq!(value["tier"], "primary");
        assert_eq!(value["price_range"], "₹1-₹2");
        assert_eq!(value["reasoning"]["brand_factor"], "b");
        assert_eq!(value["min"], 1);
        assert_eq!(value["max"], 2);
        assert_eq!(value["verdict"], "above_range");
        assert_eq!(value["json_text"], text);
        assert!(value["raw"].is_null());
    }
}
